//! Shared HTTP client construction

use apkwatch_core::NetworkConfig;
use tracing::debug;

use crate::error::{Result, UpdateError};

/// Build the client shared by the version checker and the downloader
///
/// Only the connect phase is bounded here; request deadlines are applied
/// per call by the checker and the downloader.
pub fn build_client(network: &NetworkConfig) -> Result<reqwest::Client> {
    debug!(
        "Creating HTTP client: user_agent={}, timeout={}s",
        network.user_agent, network.timeout_secs
    );

    reqwest::Client::builder()
        .user_agent(&network.user_agent)
        .connect_timeout(network.timeout())
        .build()
        .map_err(|e| UpdateError::Client(e.to_string()))
}
