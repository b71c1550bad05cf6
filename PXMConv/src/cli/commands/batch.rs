//! CLI command for directory-wide conversion

use std::path::Path;
use std::time::Instant;

use anyhow::Context;

use crate::batch::{batch_convert, find_pxm_files};
use crate::cli::progress::{GEAR, LOOKING_GLASS, print_done, print_step, simple_bar};
use crate::converter::ConvertOptions;

/// Convert every .pxm under `dir`. Per-file failures are reported but never
/// turn into an error.
pub fn execute(dir: &Path, options: &ConvertOptions, quiet: bool) -> anyhow::Result<()> {
    let started = Instant::now();

    if !quiet {
        print_step(1, 2, LOOKING_GLASS, &format!("Scanning {}...", dir.display()));
    }
    let files = find_pxm_files(dir).with_context(|| format!("Cannot scan {}", dir.display()))?;

    if files.is_empty() {
        println!("No .pxm files found in: {}", dir.display());
        return Ok(());
    }

    let result = if quiet {
        batch_convert(&files, options, |_, _, _| {})
    } else {
        print_step(2, 2, GEAR, &format!("Converting {} files...", files.len()));
        let pb = simple_bar(files.len() as u64, "Converting");
        let result = batch_convert(&files, options, |current, _, path| {
            let display = path.strip_prefix(dir).unwrap_or(path).display();
            pb.println(format!("{display}: Converting..."));
            pb.set_position(current as u64);
        });
        pb.finish_and_clear();
        result
    };

    for (path, error) in &result.errors {
        eprintln!("  Failed {}: {error}", path.display());
    }
    println!(
        "Converted {} of {} files ({} failed)",
        result.success_count,
        files.len(),
        result.fail_count
    );
    if !quiet {
        print_done(started.elapsed());
    }

    Ok(())
}
