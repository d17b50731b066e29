//! Terminal output utilities

use apkwatch_update::progress::human_readable_size;
use apkwatch_update::{CycleObserver, Result, UpdateResult};
use console::style;
use tracing::debug;

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Reports cycle outcomes as status lines
///
/// Silent when `quiet` is set, except for failures.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleObserver {
    quiet: bool,
}

impl ConsoleObserver {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl CycleObserver for ConsoleObserver {
    fn on_cycle_start(&self, cycle: u64) {
        debug!(cycle = cycle, "checking for updates");
    }

    fn on_cycle_complete(&self, _cycle: u64, result: &Result<UpdateResult>) {
        match result {
            Ok(UpdateResult::Downloaded {
                version,
                path,
                source,
                bytes,
            }) if !self.quiet => {
                success(&format!("Downloaded version {}", version));
                kv("File", &path.display().to_string());
                kv("Size", &human_readable_size(*bytes));
                kv("Source", &source.to_string());
            }
            Ok(UpdateResult::AlreadyPresent { version, .. }) if !self.quiet => {
                info(&format!("Version {} is up to date", version));
            }
            Ok(_) => {}
            Err(e) => error(&format!("Update check failed: {}", e)),
        }
    }

    fn on_tick_skipped(&self) {
        if !self.quiet {
            warning("Previous update check still running, skipping this one");
        }
    }
}
