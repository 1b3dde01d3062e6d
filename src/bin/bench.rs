use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;
use std::fs;
use std::hint::black_box;
use std::path::PathBuf;
use std::time::Instant;

use tick_data::decoder::{DecodeError, decode_buffer, decode_file};
use tick_data::record::RECORD_SIZE;

#[derive(Debug, Parser)]
#[command(about = "Decode a tick capture repeatedly and report throughput")]
struct Args {
    /// Input file path to read (.bin)
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Number of timed decode passes over the file
    #[arg(long, default_value_t = 10)]
    iterations: u32,

    /// Print the leading records after decoding
    #[arg(long, default_value_t = false)]
    dump: bool,

    /// Number of records to print when dumping
    #[arg(long, default_value_t = 5)]
    top: usize,

    /// Emit the report as JSON on stdout
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    file: String,
    bytes: usize,
    records: usize,
    iterations: u32,
    total_secs: f64,
    ns_per_record: f64,
    records_per_sec: f64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // One checked pass through the file API first, so each outcome gets its
    // own message before any timing happens.
    let ticks = match decode_file(&args.input) {
        Ok(t) => t,
        Err(DecodeError::MalformedLength { len }) => {
            bail!(
                "{}: length {len} is not a multiple of {RECORD_SIZE}; refusing to benchmark a malformed capture",
                args.input.display()
            );
        }
        Err(DecodeError::PartialDecode { ticks, failed_index, source }) => {
            bail!(
                "{}: decode stopped at record {failed_index} ({source}); {} records recovered, not timing a partial file",
                args.input.display(),
                ticks.len()
            );
        }
        Err(DecodeError::SourceUnavailable(e)) => {
            bail!("{}: source unavailable: {e}", args.input.display());
        }
    };

    if args.dump {
        for (i, t) in ticks.iter().take(args.top).enumerate() {
            println!(
                "{:>4}: ts={} sym={:>4} px={:>12.4} vol={:>6}",
                i, t.timestamp, t.symbol_id, t.price, t.volume
            );
        }
    }

    let buf = fs::read(&args.input).with_context(|| format!("reread {:?}", args.input))?;

    let started = Instant::now();
    for _ in 0..args.iterations {
        let decoded = decode_buffer(black_box(&buf))?;
        black_box(decoded);
    }
    let total = started.elapsed();

    let decoded_records = ticks.len() as u64 * u64::from(args.iterations);
    let report = Report {
        file: args.input.display().to_string(),
        bytes: buf.len(),
        records: ticks.len(),
        iterations: args.iterations,
        total_secs: total.as_secs_f64(),
        ns_per_record: if decoded_records > 0 {
            total.as_nanos() as f64 / decoded_records as f64
        } else {
            0.0
        },
        records_per_sec: if total.as_secs_f64() > 0.0 {
            decoded_records as f64 / total.as_secs_f64()
        } else {
            0.0
        },
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        eprintln!(
            "Decoded {} records ({:.2} MB) x{} in {:.3}s",
            report.records,
            report.bytes as f64 / (1024.0 * 1024.0),
            report.iterations,
            report.total_secs,
        );
        eprintln!(
            "Per record: {:.1} ns; throughput: {:.0} records/s",
            report.ns_per_record, report.records_per_sec,
        );
    }
    Ok(())
}
