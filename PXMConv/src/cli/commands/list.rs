use std::path::Path;

use anyhow::Context;

use crate::operations::PxmOperations;

pub fn execute(source: &Path) -> anyhow::Result<()> {
    let records = PxmOperations::list(source)
        .with_context(|| format!("Read error: {}", source.display()))?;

    println!("{}: {} entries", source.display(), records.len());
    println!("  {:>5}  {:>10}  {:>10}", "#", "offset", "size");
    for (i, record) in records.iter().enumerate() {
        println!("  {:>5}  {:>10}  {:>10}", i, record.offset, record.size);
    }
    Ok(())
}
