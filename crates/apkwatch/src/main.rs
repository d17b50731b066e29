//! apkwatch - Watch version endpoints and download new application packages
//!
//! Loads the configuration, runs one check at startup and, when auto-check is
//! enabled, keeps re-checking until Ctrl+C.

mod cli;
mod output;

use anyhow::{Context, Result};
use apkwatch_core::ConfigLoader;
use apkwatch_update::{scheduler_for, ArtifactUpdater};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;
use output::ConsoleObserver;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize rustls crypto provider (required for rustls 0.23+)
    // This must be done before any TLS operations
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let loader = ConfigLoader::new().context("Failed to determine working directory")?;
    let loaded = loader
        .load(cli.config.as_deref())
        .context("Failed to load configuration")?;
    info!("Using configuration from {}", loaded.config_path);

    let mut config = loaded.config;
    if cli.once {
        config.auto_check.enabled = false;
    }
    if cli.quiet {
        config.network.show_progress = false;
    }

    let updater = ArtifactUpdater::new(config).context("Failed to initialize updater")?;
    updater
        .ensure_download_dir()
        .context("Failed to prepare download directory")?;

    let scheduler = scheduler_for(updater).with_observer(Arc::new(ConsoleObserver::new(cli.quiet)));
    let stats = scheduler.run().await;

    if stats.cycles_started > 1 {
        info!(
            "Stopped after {} checks ({} skipped)",
            stats.cycles_started, stats.ticks_skipped
        );
    }

    // A failed cycle has already been reported and does not change the exit code
    Ok(())
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
