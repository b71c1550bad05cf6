//! High-level PXM file operations

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::formats::pxm::{PxmReader, PxmRecord, PxmWriter};

/// Progress callback type: (current item, total items, description)
pub type ProgressCallback<'a> = &'a dyn Fn(usize, usize, &str);

/// Output path used for entry `index` when no destination was given: `<input>_<index>`
#[must_use]
pub fn default_output_path(input: &Path, index: usize) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(format!("_{index}"));
    PathBuf::from(name)
}

/// High-level PXM container operations.
pub struct PxmOperations;

impl PxmOperations {
    /// List the directory records of a PXM file
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or its directory is truncated.
    pub fn list<P: AsRef<Path>>(pxm_path: P) -> Result<Vec<PxmRecord>> {
        let mut reader = PxmReader::new(File::open(pxm_path)?);
        Ok(reader.read_directory()?.to_vec())
    }

    /// Extract every entry of a PXM file
    ///
    /// Entry `i` goes to `destinations[i]`, or to `<pxm_path>_<i>` when fewer
    /// destinations than entries were given. Returns the paths written, in
    /// entry order.
    ///
    /// # Errors
    /// Returns an error if the container cannot be read or an output cannot be
    /// written. The whole directory is read first, so a truncated directory
    /// extracts nothing; a failure on a later entry leaves the earlier
    /// outputs in place.
    pub fn extract<P: AsRef<Path>>(pxm_path: P, destinations: &[PathBuf]) -> Result<Vec<PathBuf>> {
        Self::extract_with_progress(pxm_path, destinations, &|_, _, _| {})
    }

    /// Extract every entry of a PXM file with progress callback
    ///
    /// # Errors
    /// Returns an error if the container cannot be read or an output cannot be written.
    pub fn extract_with_progress<P: AsRef<Path>>(
        pxm_path: P,
        destinations: &[PathBuf],
        progress: ProgressCallback,
    ) -> Result<Vec<PathBuf>> {
        let pxm_path = pxm_path.as_ref();
        let mut reader = PxmReader::new(File::open(pxm_path)?);
        let total = reader.read_directory()?.len();

        if destinations.len() > total {
            tracing::warn!(
                "{} has {total} entries, ignoring {} extra destination(s)",
                pxm_path.display(),
                destinations.len() - total
            );
        }

        let mut written = Vec::with_capacity(total);
        for index in 0..total {
            let dest = destinations
                .get(index)
                .cloned()
                .unwrap_or_else(|| default_output_path(pxm_path, index));

            progress(index + 1, total, &dest.display().to_string());

            let mut writer = BufWriter::new(File::create(&dest)?);
            let size = reader.copy_entry(index, &mut writer)?;
            writer.flush()?;

            tracing::debug!("Extracted entry {index} ({size} bytes) → {}", dest.display());
            written.push(dest);
        }

        Ok(written)
    }

    /// Pack files into a new PXM container, in the order given
    ///
    /// # Errors
    /// Returns an error if an input cannot be read or the output cannot be written.
    pub fn create<P: AsRef<Path>>(output: P, inputs: &[PathBuf]) -> Result<Vec<PxmRecord>> {
        Self::create_with_progress(output, inputs, &|_, _, _| {})
    }

    /// Pack files into a new PXM container with progress callback
    ///
    /// # Errors
    /// Returns an error if an input cannot be read or the output cannot be written.
    pub fn create_with_progress<P: AsRef<Path>>(
        output: P,
        inputs: &[PathBuf],
        progress: ProgressCallback,
    ) -> Result<Vec<PxmRecord>> {
        let output = output.as_ref();
        tracing::info!("Packing {} file(s) into {}", inputs.len(), output.display());

        let writer = PxmWriter::from_files(inputs);
        writer.write_with_progress(output, &|current, total| {
            let name = inputs
                .get(current - 1)
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            progress(current, total, &name);
        })
    }
}
