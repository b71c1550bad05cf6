//! QLP legacy container format
//!
//! A fixed header followed by 24-byte directory records. Each record carries a
//! 16-byte NUL-padded name, the payload size, and the payload offset measured
//! in 4-byte words rather than bytes.

mod reader;
mod writer;

pub use reader::{parse_qlp_bytes, read_qlp};
pub use writer::{write_qlp, write_qlp_bytes};

use indexmap::IndexMap;

use super::WORD_SIZE;

/// "QLP\0" magic signature (little-endian)
pub const QLP_SIGNATURE: u32 = 0x00504C51;

/// Size of the magic + entry count header
pub const HEADER_SIZE: usize = 8;

/// Size of each directory record (16 + 4 + 4 = 24 bytes)
pub const RECORD_SIZE: usize = 24;

/// Size of the name field in each record
pub const NAME_SIZE: usize = 16;

/// A raw directory record as stored in the QLP header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QlpRecord {
    /// Entry name with trailing NUL bytes removed
    pub name: String,
    /// Payload size in bytes
    pub size: u32,
    /// Payload offset in words
    pub word_offset: u32,
}

impl QlpRecord {
    /// Absolute byte offset of the payload.
    ///
    /// This is the only place word offsets are scaled.
    #[must_use]
    pub fn byte_offset(&self) -> u64 {
        u64::from(self.word_offset) * WORD_SIZE as u64
    }
}

/// Decoded contents of a QLP container.
///
/// Entries keep the order in which their names first appear in the directory.
/// A repeated name replaces the earlier payload but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QlpArchive {
    entries: IndexMap<String, Vec<u8>>,
}

impl QlpArchive {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the payload it replaced if the name was already present.
    pub fn insert(&mut self, name: impl Into<String>, data: Vec<u8>) -> Option<Vec<u8>> {
        self.entries.insert(name.into(), data)
    }

    /// Get a payload by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Get the entry at a directory position
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&str, &[u8])> {
        self.entries
            .get_index(index)
            .map(|(name, data)| (name.as_str(), data.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in directory order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries
            .iter()
            .map(|(name, data)| (name.as_str(), data.as_slice()))
    }

    /// Entry names in directory order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<u8>)> for QlpArchive {
    fn from_iter<I: IntoIterator<Item = (S, Vec<u8>)>>(iter: I) -> Self {
        let mut archive = Self::new();
        for (name, data) in iter {
            archive.insert(name, data);
        }
        archive
    }
}
