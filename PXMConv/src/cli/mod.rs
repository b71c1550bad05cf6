//! PXMConv CLI - Command-line interface for QLP/PXM container tools

pub mod commands;
pub mod progress;

use std::path::PathBuf;

use clap::{ArgGroup, CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::converter::{ConvertOptions, DEFAULT_BACKUP_SUFFIX};
use commands::{Commands, GlobalArgs};

#[derive(Parser)]
#[command(name = "pxmconv", version)]
#[command(about = "PXM Conversion Tool: convert old PXM (QLP) files to the new format", long_about = None)]
#[command(group(ArgGroup::new("mode").args(["extract", "create", "dir", "list"])))]
struct Cli {
    /// Extract files from PXM: -x input [output] [output]...
    #[arg(short = 'x', long)]
    extract: bool,

    /// Create PXM from files: -c output [input] [input]...
    #[arg(short = 'c', long)]
    create: bool,

    /// Convert old PXM directory to new format: -d dir
    #[arg(short = 'd', long)]
    dir: bool,

    /// List the directory of a PXM: -l input
    #[arg(short = 'l', long)]
    list: bool,

    /// Suffix appended to the original file when converting in place
    #[arg(long, default_value = DEFAULT_BACKUP_SUFFIX)]
    backup_suffix: String,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Paths for the selected mode (default: input [output])
    paths: Vec<PathBuf>,
}

impl Cli {
    /// Resolve flags and positional paths into a command.
    ///
    /// Returns `None` when a mode flag was given without the paths it needs.
    fn into_command(self) -> Option<Commands> {
        let mut paths = self.paths.into_iter();

        if self.extract {
            let source = paths.next()?;
            Some(Commands::Extract {
                source,
                destinations: paths.collect(),
            })
        } else if self.create {
            let destination = paths.next()?;
            Some(Commands::Create {
                destination,
                sources: paths.collect(),
            })
        } else if self.dir {
            paths.next().map(|dir| Commands::Directory { dir })
        } else if self.list {
            paths.next().map(|source| Commands::List { source })
        } else {
            let source = paths.next()?;
            if source.as_os_str().is_empty() {
                return None;
            }
            Some(Commands::Convert {
                source,
                destination: paths.next(),
            })
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run the PXMConv CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if !cli.extract && !cli.create && !cli.dir && !cli.list && cli.paths.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }

    let global = GlobalArgs {
        quiet: cli.quiet,
        options: ConvertOptions::new().with_backup_suffix(cli.backup_suffix.clone()),
    };

    match cli.into_command() {
        Some(command) => command.execute(&global),
        None => Ok(()),
    }
}
