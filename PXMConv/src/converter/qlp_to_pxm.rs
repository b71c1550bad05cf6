//! QLP to PXM conversion
//!
//! A convertible QLP holds exactly three entries. The first becomes PXM entry
//! 1; the second and third are concatenated into PXM entry 0.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::ConvertOptions;
use crate::error::{Error, Result};
use crate::formats::pxm::{PxmRecord, write_merged_pxm};
use crate::formats::qlp::{self, QlpArchive};

/// Number of entries a QLP must hold to be converted
pub const LEGACY_ENTRY_COUNT: usize = 3;

/// Load a QLP container, degrading any read failure to an empty archive.
///
/// The failure is logged; an empty archive is then rejected by the converter
/// as having the wrong number of entries.
pub fn load_legacy<P: AsRef<Path>>(path: P) -> QlpArchive {
    qlp::read_qlp(path.as_ref()).unwrap_or_else(|e| {
        tracing::error!("Read error for {}: {e}", path.as_ref().display());
        QlpArchive::new()
    })
}

/// Parse QLP bytes, degrading any parse failure to an empty archive.
pub fn load_legacy_bytes(data: &[u8]) -> QlpArchive {
    qlp::parse_qlp_bytes(data).unwrap_or_else(|e| {
        tracing::error!("Read error: {e}");
        QlpArchive::new()
    })
}

/// The three legacy payloads in directory order
fn legacy_payloads(archive: &QlpArchive) -> Result<[&[u8]; LEGACY_ENTRY_COUNT]> {
    match (
        archive.len(),
        archive.get_index(0),
        archive.get_index(1),
        archive.get_index(2),
    ) {
        (LEGACY_ENTRY_COUNT, Some((_, first)), Some((_, second)), Some((_, third))) => {
            Ok([first, second, third])
        }
        (found, ..) => Err(Error::UnexpectedEntryCount {
            expected: LEGACY_ENTRY_COUNT,
            found,
        }),
    }
}

/// Write the PXM form of a decoded QLP archive
///
/// # Errors
/// Returns [`Error::UnexpectedEntryCount`] if the archive does not hold exactly
/// three entries; nothing is written in that case.
pub fn write_pxm_from_qlp<W: Write>(archive: &QlpArchive, writer: &mut W) -> Result<Vec<PxmRecord>> {
    let [first, second, third] = legacy_payloads(archive)?;
    write_merged_pxm(writer, first, second, third)
}

/// Convert QLP bytes to PXM bytes
///
/// # Errors
/// Returns [`Error::UnexpectedEntryCount`] if `data` does not decode to exactly
/// three entries (including when it cannot be decoded at all).
pub fn convert_qlp_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let archive = load_legacy_bytes(data);
    let mut buffer = Vec::new();
    write_pxm_from_qlp(&archive, &mut buffer)?;
    Ok(buffer)
}

/// Convert a QLP file to a PXM file
///
/// The entry count is checked before `dest` is created, so a rejected input
/// leaves no output file.
///
/// # Errors
/// Returns an error if the input is not a three-entry QLP or writing fails.
pub fn convert_qlp_file<P: AsRef<Path>, Q: AsRef<Path>>(source: P, dest: Q) -> Result<()> {
    let source = source.as_ref();
    let dest = dest.as_ref();
    tracing::info!("Converting QLP→PXM: {} → {}", source.display(), dest.display());

    let archive = load_legacy(source);
    let [first, second, third] = legacy_payloads(&archive)?;

    let file = File::create(dest)?;
    let mut writer = BufWriter::new(file);
    let records = write_merged_pxm(&mut writer, first, second, third)?;
    writer.flush()?;

    tracing::debug!("Wrote {} ({records:?})", dest.display());
    Ok(())
}

/// Convert a QLP file in place, keeping the original under a backup name.
///
/// The file is renamed to its backup path first, then converted back to the
/// original path. If conversion fails after the rename, only the backup
/// remains; the original name is not restored.
///
/// An existing backup is never replaced; the file is left untouched instead.
///
/// Returns the backup path.
///
/// # Errors
/// Returns [`Error::BackupExists`] if the backup path is taken. Otherwise
/// returns an error if the rename fails, the backup is not a three-entry QLP,
/// or writing fails.
pub fn convert_qlp_in_place<P: AsRef<Path>>(path: P, options: &ConvertOptions) -> Result<PathBuf> {
    let path = path.as_ref();
    let backup = options.backup_path(path)?;

    if fs::symlink_metadata(&backup).is_ok() {
        return Err(Error::BackupExists(backup));
    }
    fs::rename(path, &backup)?;
    tracing::debug!("Moved {} → {}", path.display(), backup.display());

    convert_qlp_file(&backup, path)?;
    Ok(backup)
}
