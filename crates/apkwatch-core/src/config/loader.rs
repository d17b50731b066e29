//! Configuration file discovery, parsing and environment overrides
//!
//! Precedence (low to high):
//! 1. Built-in defaults
//! 2. Configuration file (config.json, config.yaml or config.yml)
//! 3. Environment variables (APKWATCH_* prefix)

use crate::error::{Error, Result};
use crate::types::{AppConfig, ConfigFile};
use camino::{Utf8Path, Utf8PathBuf};
use std::env;
use std::fs;
use tracing::debug;

/// Configuration file names to search for
pub const CONFIG_FILE_NAMES: &[&str] = &["config.json", "config.yaml", "config.yml"];

/// Loaded configuration together with where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The validated configuration
    pub config: AppConfig,

    /// Path to the configuration file
    pub config_path: Utf8PathBuf,
}

/// Locates, parses and validates the configuration file
pub struct ConfigLoader {
    /// Directory where discovery starts
    start_dir: Utf8PathBuf,

    /// Whether APKWATCH_* variables are applied
    apply_env: bool,
}

impl ConfigLoader {
    /// Create a loader that searches from the current directory
    pub fn new() -> Result<Self> {
        let cwd = env::current_dir()?;
        let start_dir = Utf8PathBuf::try_from(cwd)
            .map_err(|_| Error::invalid_config("Current directory path is not valid UTF-8"))?;
        Ok(Self::with_dir(start_dir))
    }

    /// Create a loader that searches from a custom directory
    pub fn with_dir(start_dir: Utf8PathBuf) -> Self {
        Self {
            start_dir,
            apply_env: true,
        }
    }

    /// Ignore environment variable overrides
    pub fn without_env(mut self) -> Self {
        self.apply_env = false;
        self
    }

    /// Load configuration from the specified path or search for it
    pub fn load(&self, path: Option<&Utf8Path>) -> Result<LoadedConfig> {
        let (config_path, content) = match path {
            Some(p) => {
                let content = fs::read_to_string(p).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        Error::config_not_found(p.as_str())
                    } else {
                        Error::Io(e)
                    }
                })?;
                (p.to_owned(), content)
            }
            None => self.find_config()?,
        };

        debug!("Loading configuration from {}", config_path);

        let mut file = Self::parse(&config_path, &content)?;
        if self.apply_env {
            file = Self::apply_env_overrides(file)?;
        }

        let config = AppConfig::from_file(file)?;
        Ok(LoadedConfig {
            config,
            config_path,
        })
    }

    /// Parse a document according to its file extension
    pub fn parse(path: &Utf8Path, content: &str) -> Result<ConfigFile> {
        match path.extension() {
            Some("json") => Ok(serde_json::from_str(content)?),
            Some("yaml") | Some("yml") => Ok(serde_yaml_ng::from_str(content)?),
            _ => Err(Error::unsupported_format(path.as_str())),
        }
    }

    /// Find a configuration file in the start directory or its parents
    fn find_config(&self) -> Result<(Utf8PathBuf, String)> {
        let mut current = self.start_dir.as_path();

        loop {
            for name in CONFIG_FILE_NAMES {
                let path = current.join(name);
                if path.is_file() {
                    let content = fs::read_to_string(&path)?;
                    return Ok((path, content));
                }
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        Err(Error::config_not_found(
            "config.json (searched current and parent directories)",
        ))
    }

    /// Apply environment variable overrides to a parsed document
    fn apply_env_overrides(mut file: ConfigFile) -> Result<ConfigFile> {
        if let Ok(val) = env::var("APKWATCH_DOWNLOAD_PATH") {
            file.download_path = Some(val);
        }

        if let Ok(val) = env::var("APKWATCH_API_URLS") {
            file.api_urls = val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            file.api_url = None;
        }

        if let Ok(val) = env::var("APKWATCH_AUTO_CHECK_ENABLED") {
            file.auto_check.enabled = val.trim().parse().map_err(|_| {
                Error::invalid_config("APKWATCH_AUTO_CHECK_ENABLED must be true or false")
            })?;
        }

        if let Ok(val) = env::var("APKWATCH_AUTO_CHECK_INTERVAL_MS") {
            file.auto_check.interval = val.trim().parse().map_err(|_| {
                Error::invalid_config("APKWATCH_AUTO_CHECK_INTERVAL_MS must be a valid number")
            })?;
        }

        if let Ok(val) = env::var("APKWATCH_TIMEOUT_SECS") {
            file.network.timeout_secs = val.trim().parse().map_err(|_| {
                Error::invalid_config("APKWATCH_TIMEOUT_SECS must be a valid number")
            })?;
        }

        Ok(file)
    }

    /// Get the discovery start directory
    pub fn start_dir(&self) -> &Utf8Path {
        &self.start_dir
    }
}
