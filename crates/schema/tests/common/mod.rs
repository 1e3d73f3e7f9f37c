//! Shared helpers for the integration suites.

use tracing_subscriber::EnvFilter;

/// Routes library events to the test output; filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
