//! Error types for `PXMConv`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `PXMConv` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Container Errors ====================
    /// A directory record points outside the container.
    #[error("entry {index} out of bounds: {offset}+{size} exceeds stream length {len}")]
    EntryOutOfBounds {
        /// Index of the directory record.
        index: usize,
        /// Byte offset of the payload.
        offset: u64,
        /// Payload size in bytes.
        size: u64,
        /// Total length of the container stream.
        len: u64,
    },

    /// The legacy container does not hold the three entries a PXM conversion needs.
    #[error("QLP has wrong number of files ({found}, expected {expected}), not a PXM")]
    UnexpectedEntryCount {
        /// Number of entries the conversion requires.
        expected: usize,
        /// Number of entries actually parsed.
        found: usize,
    },

    /// An entry name does not fit in the fixed-width QLP name field.
    #[error("entry name too long for QLP: {name:?} ({len} bytes, max {max})")]
    NameTooLong {
        /// The offending name.
        name: String,
        /// Encoded length in bytes.
        len: usize,
        /// Width of the name field.
        max: usize,
    },

    /// A payload or computed offset does not fit in a 32-bit directory field.
    #[error("payload too large for container directory: {size} bytes")]
    PayloadTooLarge {
        /// The offending size or offset.
        size: u64,
    },

    // ==================== File System Errors ====================
    /// Invalid file path.
    #[error("invalid path: {}", .0.display())]
    InvalidPath(PathBuf),

    /// The backup path for an in-place conversion is already taken.
    #[error("backup already exists: {}", .0.display())]
    BackupExists(PathBuf),

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `PXMConv` operations.
pub type Result<T> = std::result::Result<T, Error>;
