//! CLI entry and dispatch.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dirscope_core::WrapPolicy;

use crate::logging;

mod commands;

#[derive(Parser)]
#[command(name = "dirscope")]
#[command(version)]
#[command(about = "Browse directories in the terminal and print the one you pick")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    browse: BrowseArgs,
}

/// Arguments for the interactive browser (the default command).
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BrowseArgs {
    /// Directory to start in (default: current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Show dot-directories
    #[arg(long)]
    pub hidden: bool,

    /// Wrap policy for the details pane
    #[arg(long, value_name = "none|char|word")]
    pub wrap: Option<WrapPolicy>,

    /// Write logs to this file (filter with DIRSCOPE_LOG)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Create a default config file
    Init,
}

/// Error returned when the user leaves the browser without choosing.
#[derive(Debug)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("cancelled")
    }
}

impl std::error::Error for Cancelled {}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
        None => {
            let _guard = match cli.browse.log_file.as_deref() {
                Some(path) => Some(
                    logging::init_file_logging(path)
                        .with_context(|| format!("set up logging to {}", path.display()))?,
                ),
                None => None,
            };
            commands::browse::run(&cli.browse)
        }
    }
}
