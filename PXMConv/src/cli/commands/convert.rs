//! CLI interface for QLP to PXM conversion

use std::path::Path;

use anyhow::Context;

use crate::converter::{ConvertOptions, convert_qlp_file, convert_qlp_in_place};

pub fn execute(source: &Path, destination: Option<&Path>, options: &ConvertOptions) -> anyhow::Result<()> {
    match destination {
        Some(destination) => {
            convert_qlp_file(source, destination).with_context(|| {
                format!("Write error: {} → {}", source.display(), destination.display())
            })?;
            println!("Converted {} → {}", source.display(), destination.display());
        }
        None => {
            let backup = convert_qlp_in_place(source, options)
                .with_context(|| format!("File error: {}", source.display()))?;
            println!(
                "Converted {} (original kept as {})",
                source.display(),
                backup.display()
            );
        }
    }
    Ok(())
}
