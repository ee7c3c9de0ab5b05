//! Tracing initialization

use ledgit_core::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber once
///
/// `RUST_LOG` wins when set; otherwise the configured level applies.
/// Repeated calls are ignored, so tests that share a process can call
/// this freely.
pub fn init_tracing(logging: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init();
}
