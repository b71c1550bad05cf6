use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;

use crate::cli::progress::{DISK, print_done, print_step, simple_bar};
use crate::operations::PxmOperations;

pub fn execute(destination: &Path, sources: &[PathBuf], quiet: bool) -> anyhow::Result<()> {
    let started = Instant::now();

    let result = if quiet {
        PxmOperations::create(destination, sources)
    } else {
        print_step(
            1,
            1,
            DISK,
            &format!("Packing {} file(s) into {}...", sources.len(), destination.display()),
        );
        let pb = simple_bar(sources.len() as u64, "Packing");
        let result = PxmOperations::create_with_progress(destination, sources, &|current, _, name| {
            pb.set_position(current as u64);
            pb.set_message(name.to_string());
        });
        pb.finish_and_clear();
        result
    };
    let records = result.with_context(|| format!("Write error: {}", destination.display()))?;

    if !quiet {
        println!("Wrote {} entries to {}", records.len(), destination.display());
        print_done(started.elapsed());
    }
    Ok(())
}
