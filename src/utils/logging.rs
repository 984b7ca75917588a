//! Logging setup utilities

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Respects `RUST_LOG` when set, falling back to `default_filter` otherwise.
/// Safe to call more than once; subsequent calls are no-ops.
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter.to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

/// Initialize logging for tests with a quiet default.
pub fn init_test_logging() {
    init_logging("warn");
}
