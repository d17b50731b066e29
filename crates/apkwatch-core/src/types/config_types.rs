//! Configuration file types
//!
//! `ConfigFile` mirrors the on-disk document (camelCase keys). `AppConfig` is
//! the validated, immutable value handed to every component at construction.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{PathBuf, MAIN_SEPARATOR};
use std::time::Duration;

/// Raw configuration document as written by the user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    /// Destination directory for downloaded artifacts
    #[serde(default)]
    pub download_path: Option<String>,

    /// Single version-check endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Ordered version-check endpoints
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub api_urls: Vec<String>,

    /// Periodic re-check settings
    #[serde(default)]
    pub auto_check: AutoCheckConfig,

    /// HTTP settings
    #[serde(default)]
    pub network: NetworkConfig,
}

/// Periodic re-check settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoCheckConfig {
    /// Whether to re-run the check after startup
    #[serde(default)]
    pub enabled: bool,

    /// Period between checks in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval: u64,
}

impl Default for AutoCheckConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval: default_interval_ms(),
        }
    }
}

impl AutoCheckConfig {
    /// Interval as a `Duration`
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.interval)
    }
}

fn default_interval_ms() -> u64 {
    60 * 60 * 1000 // 1 hour
}

/// Network and HTTP configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Request timeout in seconds (whole exchange for checks, headers for downloads)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent string for HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Show an interactive progress bar while downloading
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            show_progress: default_show_progress(),
        }
    }
}

impl NetworkConfig {
    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    format!(
        "apkwatch/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
fn default_show_progress() -> bool {
    true
}

/// Validated application configuration
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Destination directory, separators normalised for this platform
    pub download_path: PathBuf,

    /// Version-check endpoints in the order they are tried
    pub endpoints: Vec<String>,

    /// Periodic re-check settings
    pub auto_check: AutoCheckConfig,

    /// HTTP settings
    pub network: NetworkConfig,
}

impl AppConfig {
    /// Create a configuration with default auto-check and network settings
    pub fn new(download_path: impl Into<PathBuf>, endpoints: Vec<String>) -> Self {
        Self {
            download_path: download_path.into(),
            endpoints,
            auto_check: AutoCheckConfig::default(),
            network: NetworkConfig::default(),
        }
    }

    /// Replace the auto-check settings
    pub fn with_auto_check(mut self, auto_check: AutoCheckConfig) -> Self {
        self.auto_check = auto_check;
        self
    }

    /// Replace the network settings
    pub fn with_network(mut self, network: NetworkConfig) -> Self {
        self.network = network;
        self
    }

    /// Build and validate from a parsed document
    pub fn from_file(file: ConfigFile) -> Result<Self> {
        let download_path = file
            .download_path
            .ok_or_else(|| Error::missing_field("downloadPath"))?;

        let mut endpoints: Vec<String> = file
            .api_urls
            .into_iter()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .collect();
        if let Some(url) = file.api_url.map(|u| u.trim().to_string()) {
            if !url.is_empty() && !endpoints.contains(&url) {
                endpoints.push(url);
            }
        }

        let config = Self {
            download_path: normalize_download_path(&download_path),
            endpoints,
            auto_check: file.auto_check,
            network: file.network,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.download_path.as_os_str().is_empty() {
            return Err(Error::invalid_config("downloadPath must not be empty"));
        }
        if self.endpoints.is_empty() {
            return Err(Error::missing_field("apiUrl or apiUrls"));
        }
        if self.auto_check.enabled && self.auto_check.interval == 0 {
            return Err(Error::invalid_config(
                "autoCheck.interval must be greater than 0 when autoCheck.enabled is true",
            ));
        }
        if self.network.timeout_secs == 0 {
            return Err(Error::invalid_config(
                "network.timeoutSecs must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// Map both `/` and `\` to the platform separator
pub fn normalize_download_path(raw: &str) -> PathBuf {
    let normalized: String = raw
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
        .collect();
    PathBuf::from(normalized)
}
