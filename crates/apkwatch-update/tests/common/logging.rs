//! Log capture for tests
//!
//! Output goes through the libtest writer, so it is only shown for failing
//! tests. Set `RUST_LOG` to change the level.

use tracing_subscriber::EnvFilter;

/// Install a test subscriber once per test binary
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_test_writer()
        .try_init();
}
