//! Version polling and artifact download for apkwatch
//!
//! Provides:
//! - Version checking against one or more JSON endpoints
//! - Streaming artifact download with progress reporting
//! - Partial-file cleanup on every failure path
//! - Ordered fallback across alternate endpoints
//! - Periodic scheduling with an in-flight guard

pub mod checker;
pub mod download;
pub mod error;
pub mod http;
pub mod progress;
pub mod scheduler;
pub mod updater;

pub use checker::{ReleaseInfo, VersionChecker, VersionEnvelope};
pub use download::{DownloadResult, Downloader};
pub use error::{Result, UpdateError};
pub use progress::{BarReporter, DownloadProgress, NoOpReporter, ProgressReporter};
pub use scheduler::{
    scheduler_for, CycleObserver, Scheduler, SchedulerStats, TracingCycleObserver, UpdateCycle,
};
pub use updater::{ArtifactUpdater, UpdateResult};

/// Current crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Artifact filename prefix
pub const ARTIFACT_PREFIX: &str = "arcaea_";

/// Artifact filename extension
pub const ARTIFACT_EXTENSION: &str = ".apk";

/// Suffix of the in-progress download file
pub const PART_SUFFIX: &str = ".part";
