//! On-disk tick schema.
//!
//! A capture file is a flat sequence of fixed-size records with no header,
//! no separators and no footer. Each record is exactly [`RECORD_SIZE`] bytes,
//! packed little-endian:
//!
//! | offset | size | field     |
//! |--------|------|-----------|
//! | 0      | 8    | timestamp |
//! | 8      | 4    | symbol_id |
//! | 12     | 8    | price     |
//! | 20     | 4    | volume    |
//!
//! The layout is packed, not natively aligned, so fields are always copied
//! out byte-wise at their fixed offsets rather than by casting the window to
//! a struct.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Exact size of one encoded tick in the byte stream.
pub const RECORD_SIZE: usize = 24;

const TIMESTAMP_OFFSET: usize = 0;
const SYMBOL_ID_OFFSET: usize = 8;
const PRICE_OFFSET: usize = 12;
const VOLUME_OFFSET: usize = 20;

/// One decoded tick observation.
///
/// Timestamps are microseconds since the Unix epoch and are only locally
/// ordered in real captures; consumers must not assume the sequence is
/// globally sorted. No semantic range is enforced on any field: a NaN price
/// or a zero volume decodes without error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub timestamp: u64,
    pub symbol_id: u32,
    pub price: f64,
    pub volume: u32,
}

/// A decode window had the wrong length.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("tick window is {0} bytes, expected {RECORD_SIZE}")]
pub struct WindowSizeError(pub usize);

impl Tick {
    /// Decode one tick from a 24-byte window.
    ///
    /// Any 24 bytes decode to *some* tick; the only failure is a window of
    /// the wrong length.
    pub fn decode(window: &[u8]) -> Result<Self, WindowSizeError> {
        if window.len() != RECORD_SIZE {
            return Err(WindowSizeError(window.len()));
        }
        let read_u64 = |o: usize| -> u64 {
            let mut tmp = [0u8; 8];
            tmp.copy_from_slice(&window[o..o + 8]);
            u64::from_le_bytes(tmp)
        };
        let read_u32 = |o: usize| -> u32 {
            let mut tmp = [0u8; 4];
            tmp.copy_from_slice(&window[o..o + 4]);
            u32::from_le_bytes(tmp)
        };
        let read_f64 = |o: usize| -> f64 {
            let mut tmp = [0u8; 8];
            tmp.copy_from_slice(&window[o..o + 8]);
            f64::from_le_bytes(tmp)
        };
        Ok(Self {
            timestamp: read_u64(TIMESTAMP_OFFSET),
            symbol_id: read_u32(SYMBOL_ID_OFFSET),
            price: read_f64(PRICE_OFFSET),
            volume: read_u32(VOLUME_OFFSET),
        })
    }

    /// Encode this tick into its 24-byte wire form.
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut out = [0u8; RECORD_SIZE];
        out[TIMESTAMP_OFFSET..TIMESTAMP_OFFSET + 8].copy_from_slice(&self.timestamp.to_le_bytes());
        out[SYMBOL_ID_OFFSET..SYMBOL_ID_OFFSET + 4].copy_from_slice(&self.symbol_id.to_le_bytes());
        out[PRICE_OFFSET..PRICE_OFFSET + 8].copy_from_slice(&self.price.to_le_bytes());
        out[VOLUME_OFFSET..VOLUME_OFFSET + 4].copy_from_slice(&self.volume.to_le_bytes());
        out
    }
}
