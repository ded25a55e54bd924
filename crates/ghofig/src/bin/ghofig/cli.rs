//! Command-line surface. Everything else is configured through `ghofig.toml`.

use clap::{ArgAction, Parser};

#[derive(Debug, Parser)]
#[command(
    name = "ghofig",
    version,
    about = "Browse Ghostty configuration options and edit your config file",
    disable_version_flag = true
)]
pub struct Cli {
    /// Print version and exit.
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}
