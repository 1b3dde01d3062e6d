use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tick_data::decoder::{DecodeError, decode_file};
use tick_data::generator::{GeneratorConfig, generate};
use tick_data::record::{RECORD_SIZE, Tick};

fn write_ticks(path: &Path, ticks: &[Tick]) {
    let f = File::create(path).unwrap();
    let mut w = BufWriter::new(f);
    for t in ticks {
        w.write_all(&t.to_bytes()).unwrap();
    }
    w.flush().unwrap();
}

#[test]
fn end_to_end_generate_write_decode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ticks.bin");
    let cfg = GeneratorConfig { records: 5_000, symbols: 8, seed: 99, ..Default::default() };
    let ticks = generate(&cfg);
    write_ticks(&path, &ticks);

    let decoded = decode_file(&path).unwrap();
    assert_eq!(decoded.len(), cfg.records);
    assert_eq!(decoded, ticks);
}

#[test]
fn trailing_byte_fails_the_whole_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("truncated.bin");
    let cfg = GeneratorConfig { records: 100, seed: 1, ..Default::default() };
    let ticks = generate(&cfg);

    let f = File::create(&path).unwrap();
    let mut w = BufWriter::new(f);
    for t in &ticks {
        w.write_all(&t.to_bytes()).unwrap();
    }
    // stray byte
    w.write_all(&[0xAB]).unwrap();
    w.flush().unwrap();
    drop(w);

    match decode_file(&path) {
        Err(DecodeError::MalformedLength { len }) => assert_eq!(len, 100 * RECORD_SIZE + 1),
        other => panic!("expected MalformedLength, got {other:?}"),
    }
}

#[test]
fn missing_file_reports_source_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does_not_exist.bin");
    match decode_file(&path) {
        Err(DecodeError::SourceUnavailable(e)) => {
            assert_eq!(e.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected SourceUnavailable, got {other:?}"),
    }
}

#[test]
fn empty_file_decodes_to_empty_success() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.bin");
    File::create(&path).unwrap();
    let decoded = decode_file(&path).unwrap();
    assert!(decoded.is_empty());
}

#[test]
fn shuffled_capture_is_coarsely_ordered_but_not_sorted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shuffled.bin");
    let cfg = GeneratorConfig { records: 5_000, seed: 2024, ..Default::default() };
    let ticks = generate(&cfg);
    write_ticks(&path, &ticks);
    let decoded = decode_file(&path).unwrap();

    // Locally out of order somewhere...
    assert!(decoded.windows(2).any(|w| w[0].timestamp > w[1].timestamp));
    // ...but monotonic at a stride well past the shuffle radius.
    let stride = 5 * cfg.shuffle_radius;
    assert!(
        (0..decoded.len() - stride).all(|i| decoded[i].timestamp < decoded[i + stride].timestamp)
    );
}
