//! Tick file decoder and generator library.
//!
//! This crate provides the core types and logic used by the `tick-data`
//! generator binary and the `bench` tool:
//!
//! - `record`: the fixed 24-byte on-disk tick layout and its byte-wise codec
//! - `decoder`: whole-buffer validation and the decode loop, with an
//!   enumerated outcome for malformed, partially decoded, and unreadable
//!   inputs
//! - `generator`: deterministic synthetic tick streams, including the local
//!   timestamp shuffle that real consumers must tolerate
//!
//! The binaries in this repository (`src/main.rs` and `src/bin/bench.rs`)
//! use these modules to write fixture files and to measure decode
//! throughput.
pub mod decoder;
pub mod generator;
pub mod record;
