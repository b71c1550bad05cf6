use std::path::PathBuf;

use crate::converter::ConvertOptions;

pub mod batch;
pub mod convert;
pub mod create;
pub mod execute;
pub mod extract;
pub mod list;

/// Options shared by every command
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    /// Suppress progress output
    pub quiet: bool,
    /// In-place conversion options
    pub options: ConvertOptions,
}

/// A resolved command-line operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Convert a legacy file, in place when no destination is given
    Convert {
        source: PathBuf,
        destination: Option<PathBuf>,
    },

    /// Extract PXM entries, falling back to `<source>_<index>` names
    Extract {
        source: PathBuf,
        destinations: Vec<PathBuf>,
    },

    /// Pack files into a PXM
    Create {
        destination: PathBuf,
        sources: Vec<PathBuf>,
    },

    /// Convert every .pxm file under a directory in place
    Directory { dir: PathBuf },

    /// Print the directory of a PXM
    List { source: PathBuf },
}
