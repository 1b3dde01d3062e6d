//! Tick file decoder.
//!
//! Turns a raw byte buffer into an ordered `Vec<Tick>` under the fixed
//! 24-byte layout defined in [`crate::record`]. The whole-buffer length is
//! validated once up front; a length that is not a multiple of the record
//! size means the file cannot be segmented at all and is rejected outright.
//! After that the buffer is walked in consecutive 24-byte windows, in file
//! order, and every window decodes to exactly one tick.
//!
//! Failure outcomes are enumerated in [`DecodeError`] so callers can branch
//! on them: a malformed length yields zero records, a mid-stream failure
//! yields the prefix decoded so far, and an unreadable source yields zero
//! records under its own tag. A zero-length buffer is a genuine empty
//! success, distinct from all three.
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::record::{RECORD_SIZE, Tick, WindowSizeError};

/// Why a decode did not produce a complete tick sequence.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The buffer cannot be segmented into whole records. Nothing is decoded.
    #[error("buffer length {len} is not a multiple of the {RECORD_SIZE}-byte record size")]
    MalformedLength { len: usize },

    /// A window failed to decode after length validation passed. `ticks`
    /// holds everything decoded before the failure point; no attempt is made
    /// to resynchronize past it.
    #[error("decode stopped at record {failed_index} ({source}); kept {} records", .ticks.len())]
    PartialDecode {
        ticks: Vec<Tick>,
        failed_index: usize,
        source: WindowSizeError,
    },

    /// The byte source could not be opened or read at all.
    #[error("source unavailable: {0}")]
    SourceUnavailable(#[source] std::io::Error),
}

/// Decode a whole buffer into ticks, in file order.
///
/// Pure and stateless: no shared state, safe to call concurrently on
/// independent buffers. On success, output index `i` corresponds to the
/// window spanning bytes `[24*i, 24*i + 24)` of the input; records are never
/// reordered, deduplicated or filtered.
pub fn decode_buffer(buf: &[u8]) -> Result<Vec<Tick>, DecodeError> {
    if buf.len() % RECORD_SIZE != 0 {
        return Err(DecodeError::MalformedLength { len: buf.len() });
    }
    let mut ticks = Vec::with_capacity(buf.len() / RECORD_SIZE);
    for (i, window) in buf.chunks_exact(RECORD_SIZE).enumerate() {
        match Tick::decode(window) {
            Ok(t) => ticks.push(t),
            // Unreachable once the length check holds, but the stop-and-keep-
            // prefix policy is part of the contract.
            Err(e) => {
                return Err(DecodeError::PartialDecode {
                    ticks,
                    failed_index: i,
                    source: e,
                });
            }
        }
    }
    Ok(ticks)
}

/// Read an entire capture file and decode it.
///
/// Segmentation needs the total length, so the file is read whole before any
/// record is emitted. A missing or unreadable path maps to
/// [`DecodeError::SourceUnavailable`].
pub fn decode_file(path: impl AsRef<Path>) -> Result<Vec<Tick>, DecodeError> {
    let buf = fs::read(path).map_err(DecodeError::SourceUnavailable)?;
    decode_buffer(&buf)
}
