//! Logging setup for the harness.
//!
//! Logs go to stderr so stdout only ever carries output records. `RUST_LOG`
//! takes precedence over the configured level.

use tracing_subscriber::EnvFilter;

fn build_filter(log_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init_logging(log_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(log_level))
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();

    tracing::debug!(log_level = %log_level, "Logging initialized");
}
