//! Batch conversion
//!
//! Finds legacy containers under a directory and converts them in place, one
//! at a time. A failure on one file is recorded and the sweep moves on.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::converter::{ConvertOptions, convert_qlp_in_place};
use crate::error::Result;

/// Extension of the files a directory sweep picks up
pub const PXM_EXTENSION: &str = "pxm";

/// Result of a batch conversion
#[derive(Debug, Clone, Default)]
pub struct BatchConvertResult {
    /// Number of successful conversions
    pub success_count: usize,
    /// Number of failed conversions
    pub fail_count: usize,
    /// Messages for each file processed
    pub results: Vec<String>,
    /// Files that failed to convert (path, error message)
    pub errors: Vec<(PathBuf, String)>,
}

/// Find all .pxm files in a directory recursively
///
/// # Returns
/// A sorted list of paths to .pxm files found in the directory tree.
///
/// Entries below `dir` that cannot be read (dangling links, unreadable
/// subdirectories) are logged and skipped.
///
/// # Errors
/// Returns an error if `dir` itself cannot be read.
pub fn find_pxm_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                tracing::warn!("Skipping {e}");
                continue;
            }
        };
        let path = entry.path();
        if entry.file_type().is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(PXM_EXTENSION))
        {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

/// Convert each file in place, sequentially
///
/// # Arguments
/// * `files` - Legacy containers to convert
/// * `options` - In-place conversion options
/// * `progress` - Called before each file with (current, total, path)
pub fn batch_convert<F>(files: &[PathBuf], options: &ConvertOptions, progress: F) -> BatchConvertResult
where
    F: Fn(usize, usize, &Path),
{
    let total = files.len();
    let mut result = BatchConvertResult::default();

    for (i, path) in files.iter().enumerate() {
        progress(i + 1, total, path);
        tracing::info!("{}: Converting...", path.display());

        match convert_qlp_in_place(path, options) {
            Ok(_) => {
                result.success_count += 1;
                result.results.push(format!("Converted: {}", path.display()));
            }
            Err(e) => {
                tracing::warn!("{}: {e}", path.display());
                result.fail_count += 1;
                result.results.push(format!("Failed {}: {e}", path.display()));
                result.errors.push((path.clone(), e.to_string()));
            }
        }
    }

    result
}

/// Find and convert every .pxm file under `dir`
///
/// # Errors
/// Returns an error only if `dir` itself cannot be read; per-file failures
/// are reported in the result.
pub fn convert_directory<P: AsRef<Path>>(dir: P, options: &ConvertOptions) -> Result<BatchConvertResult> {
    let files = find_pxm_files(dir)?;
    Ok(batch_convert(&files, options, |_, _, _| {}))
}
