//! `tracing` capture for tests.

use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber filtered by `RUST_LOG` (default `debug`).
///
/// Safe to call from every test; only the first call installs.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
    if installed.is_ok() {
        tracing::debug!("test tracing installed");
    }
}
