//! # apkwatch-core
//!
//! Core library for apkwatch providing:
//! - Configuration file discovery and parsing (config.json / config.yaml)
//! - Environment variable overrides and validation
//! - The immutable `AppConfig` value shared by every component

pub mod config;
pub mod error;
pub mod types;

pub use config::{ConfigLoader, LoadedConfig};
pub use error::{Error, Result};
pub use types::{AppConfig, AutoCheckConfig, NetworkConfig};
