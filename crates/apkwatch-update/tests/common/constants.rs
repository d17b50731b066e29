//! Shared constants for test infrastructure

use std::time::Duration;

// Version constants
pub const VERSION_5_0_3: &str = "5.0.3";
pub const VERSION_5_1_0: &str = "5.1.0";
pub const VERSION_6_0_0: &str = "6.0.0";

// Endpoint paths on the mock server
pub const API_PATH: &str = "/api";
pub const API_PRIMARY_PATH: &str = "/api/primary";
pub const API_SECONDARY_PATH: &str = "/api/secondary";
pub const API_TERTIARY_PATH: &str = "/api/tertiary";

// Artifact paths on the mock server
pub const ARTIFACT_PATH: &str = "/cdn/arcaea.apk";
pub const ARTIFACT_PRIMARY_PATH: &str = "/cdn/primary/arcaea.apk";
pub const ARTIFACT_SECONDARY_PATH: &str = "/cdn/secondary/arcaea.apk";
pub const ARTIFACT_TERTIARY_PATH: &str = "/cdn/tertiary/arcaea.apk";
pub const ARTIFACT_PATH_TRUNCATED: &str = "/cdn/truncated/arcaea.apk";

// Artifact content for testing
pub const FAKE_APK_CONTENT: &[u8] = b"fake apk content for testing";
pub const PRIMARY_APK_CONTENT: &[u8] = b"apk served by the primary source";
pub const SECONDARY_APK_CONTENT: &[u8] = b"apk served by the secondary source";
pub const EXISTING_APK_CONTENT: &[u8] = b"previously downloaded apk";

// Timing
pub const TEST_TIMEOUT_SECS: u64 = 1;
pub const SHORT_TIMEOUT: Duration = Duration::from_millis(300);
pub const SLOW_RESPONSE_DELAY: Duration = Duration::from_secs(3);

/// Artifact filename for a version
pub fn apk_name(version: &str) -> String {
    format!("arcaea_{}.apk", version)
}
