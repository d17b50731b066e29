//! Error types for version checks and downloads

use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Result type alias using apkwatch-update's error type
pub type Result<T> = std::result::Result<T, UpdateError>;

/// Errors raised while checking for or downloading an artifact
#[derive(Error, Debug)]
pub enum UpdateError {
    /// Connection or transport failure, including non-success HTTP status
    #[error("Network error ({url}): {message}")]
    Network { url: String, message: String },

    /// No complete response within the request timeout
    #[error("Request timed out after {}s ({url})", .timeout.as_secs_f64())]
    Timeout { url: String, timeout: Duration },

    /// Malformed JSON or unexpected response shape
    #[error("Invalid response ({url}): {message}")]
    Parse { url: String, message: String },

    /// Directory or file creation/write failure
    #[error("Filesystem error at {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A fallback source reported a different version than the one targeted
    #[error("Version mismatch: expected {expected}, source reported {actual}")]
    VersionMismatch { expected: String, actual: String },

    /// Every configured source failed during one cycle
    #[error("All {attempts} update sources failed (last error: {last_error})")]
    SourcesExhausted { attempts: usize, last_error: String },

    /// No endpoints configured
    #[error("No update sources configured")]
    NoSources,

    /// HTTP client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

impl UpdateError {
    /// Create a network error
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(url: impl Into<String>, timeout: Duration) -> Self {
        Self::Timeout {
            url: url.into(),
            timeout,
        }
    }

    /// Create a parse error
    pub fn parse(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a filesystem error
    pub fn filesystem(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a version mismatch error
    pub fn version_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::VersionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Classify a reqwest error
    pub fn from_reqwest(url: impl Into<String>, err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::timeout(url, timeout)
        } else {
            Self::network(url, err.to_string())
        }
    }

    /// Whether this error is a request timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
