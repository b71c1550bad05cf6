use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::cli::progress::{PACKAGE, print_step, simple_bar};
use crate::operations::PxmOperations;

pub fn execute(source: &Path, destinations: &[PathBuf], quiet: bool) -> anyhow::Result<()> {
    let result = if quiet {
        PxmOperations::extract(source, destinations)
    } else {
        print_step(1, 1, PACKAGE, &format!("Extracting {}...", source.display()));
        let pb = simple_bar(0, "Extracting");
        let result = PxmOperations::extract_with_progress(source, destinations, &|current, total, name| {
            pb.set_length(total as u64);
            pb.set_position(current as u64);
            pb.set_message(name.to_string());
        });
        pb.finish_and_clear();
        result
    };
    let written = result.with_context(|| format!("Extract error: {}", source.display()))?;

    for path in &written {
        println!("  {}", path.display());
    }
    Ok(())
}
