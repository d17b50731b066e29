//! Builders for configuration and components under test

use apkwatch_core::{AppConfig, AutoCheckConfig, NetworkConfig};
use apkwatch_update::http::build_client;
use apkwatch_update::{ArtifactUpdater, Downloader, VersionChecker};
use std::path::Path;
use std::time::Duration;

use super::constants::TEST_TIMEOUT_SECS;

/// Network settings for tests: short timeout, no progress bar
pub fn test_network() -> NetworkConfig {
    NetworkConfig {
        timeout_secs: TEST_TIMEOUT_SECS,
        user_agent: "apkwatch-tests/1.0".to_string(),
        show_progress: false,
    }
}

/// Configuration pointing at a download directory and endpoints
pub fn test_config(download_dir: &Path, endpoints: Vec<String>) -> AppConfig {
    AppConfig::new(download_dir, endpoints).with_network(test_network())
}

/// Configuration with auto-check enabled
pub fn auto_check_config(download_dir: &Path, endpoints: Vec<String>, interval_ms: u64) -> AppConfig {
    test_config(download_dir, endpoints).with_auto_check(AutoCheckConfig {
        enabled: true,
        interval: interval_ms,
    })
}

/// Updater built from a test configuration
pub fn test_updater(download_dir: &Path, endpoints: Vec<String>) -> ArtifactUpdater {
    ArtifactUpdater::new(test_config(download_dir, endpoints))
        .expect("ArtifactUpdater::new should succeed")
}

/// Checker with a custom timeout
pub fn test_checker(timeout: Duration) -> VersionChecker {
    let client = build_client(&test_network()).expect("client should build");
    VersionChecker::new(client, timeout)
}

/// Downloader with a custom timeout and no progress output
pub fn test_downloader(timeout: Duration) -> Downloader {
    let client = build_client(&test_network()).expect("client should build");
    Downloader::new(client, timeout)
}
