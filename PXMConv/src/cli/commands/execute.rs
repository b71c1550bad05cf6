//! Command execution implementations

use super::{Commands, GlobalArgs};
use super::{batch, convert, create, extract, list};

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying operation fails. Directory sweeps
    /// only fail when the directory itself cannot be traversed.
    pub fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        match self {
            Commands::Convert {
                source,
                destination,
            } => convert::execute(source, destination.as_deref(), &global.options),
            Commands::Extract {
                source,
                destinations,
            } => extract::execute(source, destinations, global.quiet),
            Commands::Create {
                destination,
                sources,
            } => create::execute(destination, sources, global.quiet),
            Commands::Directory { dir } => batch::execute(dir, &global.options, global.quiet),
            Commands::List { source } => list::execute(source),
        }
    }
}
