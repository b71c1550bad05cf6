//! Options for in-place conversion

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Suffix appended to a file name when it is converted in place
pub const DEFAULT_BACKUP_SUFFIX: &str = ".BAK";

/// Options for in-place QLP to PXM conversion.
///
/// # Example
///
/// ```
/// use pxmconv::converter::ConvertOptions;
///
/// let options = ConvertOptions::new().with_backup_suffix(".qlp");
/// assert_eq!(options.backup_suffix, ".qlp");
/// ```
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Appended to the original file name to form the backup path
    /// Default: ".BAK"
    pub backup_suffix: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvertOptions {
    #[must_use]
    pub fn new() -> Self {
        Self {
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
        }
    }

    /// Set the backup suffix
    #[must_use]
    pub fn with_backup_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.backup_suffix = suffix.into();
        self
    }

    /// Path the original file is moved to before conversion
    ///
    /// # Errors
    /// Returns [`Error::InvalidPath`] if `path` has no file name or the suffix is empty.
    pub fn backup_path(&self, path: &Path) -> Result<PathBuf> {
        if path.file_name().is_none() || self.backup_suffix.is_empty() {
            return Err(Error::InvalidPath(path.to_path_buf()));
        }
        let mut name = OsString::from(path.as_os_str());
        name.push(&self.backup_suffix);
        Ok(PathBuf::from(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_path_appends_suffix() {
        let options = ConvertOptions::new();
        assert_eq!(
            options.backup_path(Path::new("data/model.pxm")).unwrap(),
            PathBuf::from("data/model.pxm.BAK")
        );
    }

    #[test]
    fn test_backup_path_rejects_empty_suffix() {
        let options = ConvertOptions::new().with_backup_suffix("");
        assert!(matches!(
            options.backup_path(Path::new("model.pxm")),
            Err(Error::InvalidPath(_))
        ));
    }
}
