//! PXM container format reader/writer
//!
//! An 8-byte header (magic + entry count), then one 8-byte record per entry
//! holding an absolute byte offset and a size. Payloads follow the directory,
//! each padded so the next one starts on a word boundary.

mod reader;
mod writer;

pub use reader::{PxmReader, parse_pxm_bytes};
pub use writer::{PayloadSource, PxmWriter, write_merged_pxm, write_pxm_bytes};

use crate::error::{Error, Result};
use super::padding_for;

/// "PXM\0" magic signature (little-endian)
pub const PXM_SIGNATURE: u32 = 0x004D5850;

/// Size of the magic + entry count header
pub const HEADER_SIZE: usize = 8;

/// Size of each directory record (offset + size)
pub const RECORD_SIZE: usize = 8;

/// Directory record describing one payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PxmRecord {
    /// Absolute byte offset of the payload
    pub offset: u32,
    /// Payload size in bytes
    pub size: u32,
}

impl PxmRecord {
    /// Byte position one past the payload
    #[must_use]
    pub fn end(&self) -> u64 {
        u64::from(self.offset) + u64::from(self.size)
    }
}

/// Offset of the first payload for a directory of `count` entries
#[must_use]
pub fn data_start(count: usize) -> usize {
    HEADER_SIZE + RECORD_SIZE * count
}

/// Compute the directory for payloads of the given sizes.
///
/// Payloads are placed back to back after the directory, each followed by
/// enough padding to put the next one on a word boundary.
///
/// # Errors
/// Returns [`Error::PayloadTooLarge`] if an offset no longer fits in 32 bits.
pub fn compute_layout(sizes: &[u32]) -> Result<Vec<PxmRecord>> {
    let mut cursor = data_start(sizes.len()) as u64;
    let mut records = Vec::with_capacity(sizes.len());

    for &size in sizes {
        let offset = u32::try_from(cursor).map_err(|_| Error::PayloadTooLarge { size: cursor })?;
        records.push(PxmRecord { offset, size });
        cursor += u64::from(size) + padding_for(size as usize) as u64;
    }

    Ok(records)
}
