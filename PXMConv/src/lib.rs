//! # PXMConv
//!
//! A pure-Rust library for the QLP and PXM game asset containers.
//!
//! ## Supported Formats
//!
//! - **QLP** - Legacy three-entry container with named, word-addressed records
//! - **PXM** - Offset/size container holding any number of opaque payloads
//!
//! ## Quick Start
//!
//! ### Converting Legacy Containers
//!
//! ```no_run
//! use pxmconv::converter::{ConvertOptions, convert_qlp_file, convert_qlp_in_place};
//!
//! // Convert to a new file
//! convert_qlp_file("model.pxm", "model_new.pxm")?;
//!
//! // Convert in place, keeping the original as model.pxm.BAK
//! let backup = convert_qlp_in_place("model.pxm", &ConvertOptions::default())?;
//! # Ok::<(), pxmconv::Error>(())
//! ```
//!
//! ### Working with PXM Containers
//!
//! ```no_run
//! use std::path::PathBuf;
//! use pxmconv::PxmOperations;
//!
//! // Pack files, then extract them again (model.pxm_0, model.pxm_1)
//! PxmOperations::create("model.pxm", &[PathBuf::from("a.bin"), PathBuf::from("b.bin")])?;
//! let written = PxmOperations::extract("model.pxm", &[])?;
//! # Ok::<(), pxmconv::Error>(())
//! ```
//!
//! ### In-Memory Buffers
//!
//! ```
//! use pxmconv::formats::pxm::{parse_pxm_bytes, write_pxm_bytes};
//!
//! let bytes = write_pxm_bytes(&[b"abc".as_slice(), b"defgh".as_slice()])?;
//! assert_eq!(parse_pxm_bytes(&bytes)?, vec![b"abc".to_vec(), b"defgh".to_vec()]);
//! # Ok::<(), pxmconv::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `pxmconv` command-line binary

pub mod batch;
pub mod converter;
pub mod error;
pub mod formats;
pub mod operations;

// Re-exports for convenience
pub use error::{Error, Result};
pub use operations::PxmOperations;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::pxm::{PxmReader, PxmRecord, PxmWriter};
    pub use crate::formats::qlp::{QlpArchive, QlpRecord};

    pub use crate::converter::{
        ConvertOptions, convert_qlp_bytes, convert_qlp_file, convert_qlp_in_place,
    };
    pub use crate::operations::{PxmOperations, default_output_path};
    pub use crate::batch::{BatchConvertResult, batch_convert, convert_directory, find_pxm_files};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
