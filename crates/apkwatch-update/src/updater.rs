//! Check-then-download cycle with ordered source fallback
//!
//! One cycle walks the configured endpoints in order. For each source:
//! 1. Fetch and validate the version envelope
//! 2. Pin the targeted version (first successful check) or reject a mismatch
//! 3. Skip if `arcaea_<version>.apk` already exists
//! 4. Otherwise download the artifact
//!
//! The first source that completes steps 1-4 ends the cycle. Failures move on
//! to the next source; when none are left the cycle fails.

use apkwatch_core::AppConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::checker::{artifact_file_name, VersionChecker};
use crate::download::Downloader;
use crate::error::{Result, UpdateError};
use crate::http::build_client;

/// Polls endpoints and downloads new artifacts
pub struct ArtifactUpdater {
    /// Immutable application configuration
    config: AppConfig,

    /// Version-check client
    checker: VersionChecker,

    /// Artifact downloader
    downloader: Downloader,
}

impl ArtifactUpdater {
    /// Create an updater from configuration
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = build_client(&config.network)?;
        let timeout = config.network.timeout();
        let checker = VersionChecker::new(client.clone(), timeout);
        let downloader = Downloader::new(client, timeout).with_progress(config.network.show_progress);

        debug!(
            "Updater initialized: download_path={:?}, sources={}",
            config.download_path,
            config.endpoints.len()
        );

        Ok(Self::with_parts(config, checker, downloader))
    }

    /// Create an updater from pre-built components
    pub fn with_parts(config: AppConfig, checker: VersionChecker, downloader: Downloader) -> Self {
        Self {
            config,
            checker,
            downloader,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the download directory
    pub fn download_dir(&self) -> &Path {
        &self.config.download_path
    }

    /// Create the download directory (and parents) if missing
    pub fn ensure_download_dir(&self) -> Result<()> {
        let dir = self.download_dir();
        if !dir.exists() {
            info!("Creating download directory {}", dir.display());
            fs::create_dir_all(dir).map_err(|e| UpdateError::filesystem(dir, e))?;
        }
        Ok(())
    }

    /// Destination path for a version's artifact
    pub fn artifact_path(&self, version: &str) -> PathBuf {
        self.download_dir().join(artifact_file_name(version))
    }

    /// Run one check-and-download cycle across all sources
    pub async fn run_cycle(&self) -> Result<UpdateResult> {
        let endpoints = &self.config.endpoints;
        if endpoints.is_empty() {
            return Err(UpdateError::NoSources);
        }

        let mut target: Option<String> = None;
        let mut last_error: Option<UpdateError> = None;

        for (index, endpoint) in endpoints.iter().enumerate() {
            let source = index + 1;
            match self.try_source(source, endpoint, &mut target).await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    warn!("Source {} failed: {}", source, e);
                    last_error = Some(e);
                }
            }
        }

        let last_error = last_error.map(|e| e.to_string()).unwrap_or_default();
        if endpoints.len() == 1 {
            error!("Update check failed: {}", last_error);
        } else {
            error!("All {} sources failed, giving up", endpoints.len());
        }

        Err(UpdateError::SourcesExhausted {
            attempts: endpoints.len(),
            last_error,
        })
    }

    /// Run the whole check/compare/download sequence against one source
    async fn try_source(
        &self,
        source: usize,
        endpoint: &str,
        target: &mut Option<String>,
    ) -> Result<UpdateResult> {
        let release = self.checker.check(endpoint).await?;

        match target.as_deref() {
            Some(expected) if expected != release.version => {
                return Err(UpdateError::version_mismatch(expected, &release.version));
            }
            Some(_) => {}
            None => *target = Some(release.version.clone()),
        }

        let path = self.artifact_path(&release.version);
        if path.exists() {
            info!(
                "Version {} already exists, no download needed",
                release.version
            );
            return Ok(UpdateResult::AlreadyPresent {
                version: release.version,
                path,
            });
        }

        info!("New version found: {}", release.version);
        info!("Downloading version {} from source {}", release.version, source);

        let download = self.downloader.download(&release.url, &path).await?;

        info!(
            "Saved version {} to {}",
            release.version,
            download.file_path.display()
        );

        Ok(UpdateResult::Downloaded {
            version: release.version,
            path: download.file_path,
            source,
            bytes: download.file_size,
        })
    }
}

/// Result of a successful cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateResult {
    /// The reported version is already on disk
    AlreadyPresent {
        /// Reported version
        version: String,

        /// Existing artifact path
        path: PathBuf,
    },

    /// A new artifact was downloaded
    Downloaded {
        /// Downloaded version
        version: String,

        /// Artifact path
        path: PathBuf,

        /// 1-based index of the source that served it
        source: usize,

        /// Bytes written
        bytes: u64,
    },
}

impl UpdateResult {
    /// Version reported by the serving source
    pub fn version(&self) -> &str {
        match self {
            Self::AlreadyPresent { version, .. } | Self::Downloaded { version, .. } => version,
        }
    }

    /// Artifact path on disk
    pub fn path(&self) -> &Path {
        match self {
            Self::AlreadyPresent { path, .. } | Self::Downloaded { path, .. } => path,
        }
    }
}
