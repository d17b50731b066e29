//! Version-check endpoint client
//!
//! An endpoint answers a plain GET with a JSON envelope:
//!
//! ```json
//! { "success": true, "value": { "version": "5.0.3", "url": "https://cdn/x.apk" } }
//! ```

use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::error::{Result, UpdateError};
use crate::{ARTIFACT_EXTENSION, ARTIFACT_PREFIX};

/// Raw response envelope
///
/// Every field is optional so that a well-formed JSON document with the wrong
/// shape is reported as a format error rather than a decode error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionEnvelope {
    /// Whether the endpoint considers the request successful
    #[serde(default)]
    pub success: bool,

    /// Release payload
    #[serde(default)]
    pub value: Option<ReleaseValue>,
}

/// Release payload inside the envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseValue {
    /// Reported version identifier
    #[serde(default)]
    pub version: Option<String>,

    /// Artifact download URL
    #[serde(default)]
    pub url: Option<String>,
}

/// Validated release information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    /// Version identifier, safe to embed in a filename
    pub version: String,

    /// Artifact download URL
    pub url: String,
}

impl ReleaseInfo {
    /// Artifact filename for this release (`arcaea_<version>.apk`)
    pub fn file_name(&self) -> String {
        artifact_file_name(&self.version)
    }
}

/// Artifact filename for a version
pub fn artifact_file_name(version: &str) -> String {
    format!("{}{}{}", ARTIFACT_PREFIX, version, ARTIFACT_EXTENSION)
}

impl VersionEnvelope {
    /// Validate the envelope and extract the release
    pub fn into_release(self, endpoint: &str) -> Result<ReleaseInfo> {
        if !self.success {
            return Err(UpdateError::parse(
                endpoint,
                "response format invalid: success is not true",
            ));
        }

        let value = self.value.ok_or_else(|| {
            UpdateError::parse(endpoint, "response format invalid: missing value")
        })?;

        let url = value
            .url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or_else(|| {
                UpdateError::parse(endpoint, "response format invalid: missing download url")
            })?;

        let version = value
            .version
            .map(|v| v.trim().to_string())
            .ok_or_else(|| {
                UpdateError::parse(endpoint, "response format invalid: missing version")
            })?;
        validate_version(&version).map_err(|reason| UpdateError::parse(endpoint, reason))?;

        Ok(ReleaseInfo { version, url })
    }
}

/// Reject versions that cannot be used as a single filename component
fn validate_version(version: &str) -> std::result::Result<(), String> {
    if version.is_empty() {
        return Err("response format invalid: empty version".to_string());
    }
    if version.contains(['/', '\\']) || version.contains("..") {
        return Err(format!(
            "response format invalid: version {:?} is not a valid file name component",
            version
        ));
    }
    if version.chars().any(char::is_control) {
        return Err("response format invalid: version contains control characters".to_string());
    }
    Ok(())
}

/// Queries version-check endpoints
pub struct VersionChecker {
    /// HTTP client
    client: reqwest::Client,

    /// Deadline for the whole exchange (headers and body)
    timeout: Duration,
}

impl VersionChecker {
    /// Create a checker using a shared client
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Fetch and validate the latest release from an endpoint
    pub async fn check(&self, endpoint: &str) -> Result<ReleaseInfo> {
        self.fetch(endpoint).await?.into_release(endpoint)
    }

    /// Fetch the raw envelope from an endpoint
    pub async fn fetch(&self, endpoint: &str) -> Result<VersionEnvelope> {
        debug!("Checking version at {}", endpoint);

        let body = tokio::time::timeout(self.timeout, self.fetch_body(endpoint))
            .await
            .map_err(|_| UpdateError::timeout(endpoint, self.timeout))??;

        let json: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| UpdateError::parse(endpoint, format!("body is not valid JSON: {}", e)))?;

        serde_json::from_value(json).map_err(|e| {
            UpdateError::parse(endpoint, format!("unexpected response shape: {}", e))
        })
    }

    /// GET the endpoint and read the complete body as text
    async fn fetch_body(&self, endpoint: &str) -> Result<String> {
        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(|e| UpdateError::from_reqwest(endpoint, e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpdateError::network(
                endpoint,
                format!("version check failed with status: {}", status),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| UpdateError::from_reqwest(endpoint, e, self.timeout))
    }
}
