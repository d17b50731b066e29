//! Download progress accumulation and reporting
//!
//! The downloader owns a `DownloadProgress` accumulator and forwards it to a
//! `ProgressReporter` after every received chunk. `BarReporter` renders an
//! indicatif progress bar; `NoOpReporter` is used when progress output is
//! disabled.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Instant;

/// Download progress information
#[derive(Debug, Clone)]
pub struct DownloadProgress {
    /// Total bytes announced by `Content-Length`, if any
    pub total_bytes: Option<u64>,

    /// Bytes received so far
    pub downloaded_bytes: u64,

    /// When the transfer started
    started: Instant,
}

impl DownloadProgress {
    /// Create a new progress tracker
    pub fn new(total_bytes: Option<u64>) -> Self {
        Self {
            total_bytes,
            downloaded_bytes: 0,
            started: Instant::now(),
        }
    }

    /// Record a received chunk
    pub fn advance(&mut self, chunk_len: u64) {
        self.downloaded_bytes += chunk_len;
    }

    /// Progress percentage (0-100), unknown without a total
    pub fn percentage(&self) -> Option<f64> {
        match self.total_bytes {
            Some(0) => Some(100.0),
            Some(total) => Some((self.downloaded_bytes as f64 / total as f64) * 100.0),
            None => None,
        }
    }

    /// Average speed in bytes per second since the transfer started
    pub fn speed_bps(&self) -> f64 {
        let elapsed = self.started.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.downloaded_bytes as f64 / elapsed
        } else {
            0.0
        }
    }
}

/// Receives download progress events
pub trait ProgressReporter: Send + Sync {
    /// Called once the response headers arrived and the part file exists
    fn on_start(&self, label: &str, total_bytes: Option<u64>);

    /// Called after each chunk has been written
    fn on_progress(&self, progress: &DownloadProgress);

    /// Called after the last chunk, before the file is moved into place
    fn on_finish(&self, progress: &DownloadProgress);

    /// Called when the transfer fails after `on_start`
    fn on_abort(&self, progress: &DownloadProgress) {
        let _ = progress;
    }
}

/// A reporter that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpReporter;

impl ProgressReporter for NoOpReporter {
    fn on_start(&self, _label: &str, _total_bytes: Option<u64>) {}

    fn on_progress(&self, _progress: &DownloadProgress) {}

    fn on_finish(&self, _progress: &DownloadProgress) {}
}

/// Interactive terminal progress bar
#[derive(Default)]
pub struct BarReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl BarReporter {
    /// Create a new bar reporter
    pub fn new() -> Self {
        Self::default()
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(pb) = guard.as_ref() {
                f(pb);
            }
        }
    }

    fn take_bar(&self) -> Option<ProgressBar> {
        self.bar.lock().ok().and_then(|mut guard| guard.take())
    }
}

impl ProgressReporter for BarReporter {
    fn on_start(&self, label: &str, total_bytes: Option<u64>) {
        let pb = match total_bytes {
            Some(total) => {
                let pb = ProgressBar::new(total);
                pb.set_style(
                    ProgressStyle::with_template(
                        "{msg}\n[{elapsed_precise}] [{bar:50.cyan/blue}] {percent}% {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=> "),
                );
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::with_template(
                        "{msg}\n{spinner:.green} [{elapsed_precise}] {bytes} ({bytes_per_sec})",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                pb
            }
        };
        pb.set_message(format!("Downloading {}", label));

        if let Ok(mut guard) = self.bar.lock() {
            if let Some(previous) = guard.replace(pb) {
                previous.abandon();
            }
        }
    }

    fn on_progress(&self, progress: &DownloadProgress) {
        self.with_bar(|pb| pb.set_position(progress.downloaded_bytes));
    }

    fn on_finish(&self, progress: &DownloadProgress) {
        if let Some(pb) = self.take_bar() {
            pb.set_position(progress.downloaded_bytes);
            pb.finish_with_message("Download complete");
        }
    }

    fn on_abort(&self, progress: &DownloadProgress) {
        if let Some(pb) = self.take_bar() {
            pb.abandon_with_message(abort_message(progress));
        }
    }
}

fn abort_message(progress: &DownloadProgress) -> String {
    match progress.percentage() {
        Some(percent) => format!("Download failed at {:.0}%", percent),
        None => format!(
            "Download failed after {}",
            human_readable_size(progress.downloaded_bytes)
        ),
    }
}

/// Convert bytes to human-readable size
pub fn human_readable_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_index])
}
