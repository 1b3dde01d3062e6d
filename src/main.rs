use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::{Receiver, bounded};
use dotenvy::dotenv;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use time::macros::format_description;

use tick_data::generator::{GeneratorConfig, generate};
use tick_data::record::{RECORD_SIZE, Tick};

#[derive(Debug, Parser)]
#[command(version, about = "Synthetic tick capture generator")]
struct Args {
    /// Number of ticks to generate
    #[arg(long, env = "NUM_RECORDS", default_value_t = 1_000_000)]
    records: usize,

    /// Number of symbols in the dense symbol table
    #[arg(long, env = "NUM_SYMBOLS", default_value_t = 10)]
    symbols: u32,

    /// RNG seed; rerunning with the same seed reproduces the file
    #[arg(long, env = "SEED", default_value_t = 42)]
    seed: u64,

    /// Fraction of records displaced by local swaps
    #[arg(long, default_value_t = 0.10)]
    shuffle_fraction: f64,

    /// Maximum swap distance, in record positions
    #[arg(long, default_value_t = 100)]
    shuffle_radius: usize,

    /// Output file path (.bin); defaults to data/ticks_<records>_<YYYY_MM_DD>.bin
    #[arg(long, short = 'o', env = "OUT_FILE")]
    out: Option<PathBuf>,
}

fn now_unix_us() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros() as u64
}

fn writer_thread(out: PathBuf, rx: Receiver<Tick>) -> Result<u64> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).ok();
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&out)
        .with_context(|| format!("create {out:?}"))?;
    let mut w = BufWriter::with_capacity(1 << 20, file); // 1 MiB buffer
    let mut written = 0u64;
    for tick in rx {
        w.write_all(&tick.to_bytes())?;
        written += 1;
    }
    w.flush()?;
    Ok(written)
}

fn default_out_path(records: usize) -> PathBuf {
    let date = time::OffsetDateTime::now_utc().date();
    let stamp = date
        .format(format_description!("[year]_[month]_[day]"))
        .unwrap_or_default();
    let mut p = PathBuf::from("data");
    p.push(format!("ticks_{records}_{stamp}.bin"));
    p
}

fn main() -> Result<()> {
    // Load environment variables from .env if present
    let _ = dotenv();
    let args = Args::parse();

    let out_path = args.out.clone().unwrap_or_else(|| default_out_path(args.records));

    let cfg = GeneratorConfig {
        records: args.records,
        symbols: args.symbols,
        base_timestamp: now_unix_us(),
        shuffle_fraction: args.shuffle_fraction,
        shuffle_radius: args.shuffle_radius,
        seed: args.seed,
        ..GeneratorConfig::default()
    };

    eprintln!("Generating {} ticks across {} symbols...", cfg.records, cfg.symbols);
    let started = Instant::now();

    let (tx, rx) = bounded::<Tick>(8192);
    let writer_out = out_path.clone();
    let writer = std::thread::spawn(move || writer_thread(writer_out, rx));

    let ticks = generate(&cfg);
    for t in &ticks {
        // A send failure means the writer died; its own error is the one
        // worth reporting.
        if tx.send(*t).is_err() {
            break;
        }
    }
    drop(tx);

    let written = writer
        .join()
        .map_err(|_| anyhow::anyhow!("writer thread panicked"))??;

    let bytes = written * RECORD_SIZE as u64;
    let mb = bytes as f64 / (1024.0 * 1024.0);
    let elapsed = started.elapsed();
    eprintln!(
        "Wrote {} ticks ({:.2} MB) to {} in {:.2}s ({:.1} MB/s)",
        written,
        mb,
        out_path.display(),
        elapsed.as_secs_f64(),
        mb / elapsed.as_secs_f64().max(1e-9),
    );
    Ok(())
}
