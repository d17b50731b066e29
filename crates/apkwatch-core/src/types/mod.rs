//! Type definitions for apkwatch configuration

mod config_types;

pub use config_types::*;
