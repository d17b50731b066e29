//! Configuration loading

mod loader;

pub use loader::{ConfigLoader, LoadedConfig, CONFIG_FILE_NAMES};
