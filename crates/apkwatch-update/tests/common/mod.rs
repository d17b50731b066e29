//! Common test infrastructure for apkwatch-update tests
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Modules
//!
//! - `constants`: Version strings, paths and artifact payloads
//! - `builders`: Configuration and component builders
//! - `mock_server`: Wiremock setup helpers for endpoints and artifacts
//! - `reporters`: Recording progress reporter and cycle observer
//! - `logging`: tracing subscriber for test output
//! - `assertions`: Filesystem assertions for download directories

// Not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod assertions;
pub mod builders;
pub mod constants;
pub mod logging;
pub mod mock_server;
pub mod reporters;

pub use assertions::*;
pub use builders::*;
pub use constants::*;
pub use logging::*;
pub use mock_server::*;
pub use reporters::*;
