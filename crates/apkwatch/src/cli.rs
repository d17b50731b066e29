//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::Parser;

/// apkwatch - Watch version endpoints and download new application packages
#[derive(Parser, Debug)]
#[command(name = "apkwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to config.json (skips discovery)
    #[arg(short, long)]
    pub config: Option<Utf8PathBuf>,

    /// Run a single check and exit, even if auto-check is enabled
    #[arg(long)]
    pub once: bool,
}
