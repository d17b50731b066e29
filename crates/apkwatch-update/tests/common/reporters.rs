//! Recording implementations of the reporting traits

use apkwatch_update::{CycleObserver, DownloadProgress, ProgressReporter, UpdateError, UpdateResult};
use std::sync::Mutex;

/// Progress reporter that records every event
#[derive(Default)]
pub struct RecordingReporter {
    pub totals: Mutex<Vec<Option<u64>>>,
    pub positions: Mutex<Vec<u64>>,
    pub finished: Mutex<Option<u64>>,
    pub aborted: Mutex<Option<u64>>,
}

impl ProgressReporter for RecordingReporter {
    fn on_start(&self, _label: &str, total_bytes: Option<u64>) {
        self.totals.lock().unwrap().push(total_bytes);
    }

    fn on_progress(&self, progress: &DownloadProgress) {
        self.positions.lock().unwrap().push(progress.downloaded_bytes);
    }

    fn on_finish(&self, progress: &DownloadProgress) {
        *self.finished.lock().unwrap() = Some(progress.downloaded_bytes);
    }

    fn on_abort(&self, progress: &DownloadProgress) {
        *self.aborted.lock().unwrap() = Some(progress.downloaded_bytes);
    }
}

/// Cycle observer that records outcomes as short strings
#[derive(Default)]
pub struct RecordingObserver {
    pub outcomes: Mutex<Vec<String>>,
    pub skipped: Mutex<u64>,
}

impl RecordingObserver {
    pub fn outcomes(&self) -> Vec<String> {
        self.outcomes.lock().unwrap().clone()
    }
}

impl CycleObserver for RecordingObserver {
    fn on_cycle_complete(&self, cycle: u64, result: &Result<UpdateResult, UpdateError>) {
        let entry = match result {
            Ok(UpdateResult::Downloaded { version, .. }) => format!("{}: downloaded {}", cycle, version),
            Ok(UpdateResult::AlreadyPresent { version, .. }) => format!("{}: present {}", cycle, version),
            Err(e) => format!("{}: failed {}", cycle, e),
        };
        self.outcomes.lock().unwrap().push(entry);
    }

    fn on_tick_skipped(&self) {
        *self.skipped.lock().unwrap() += 1;
    }
}
