//! Tracing subscriber setup

use crate::config::LoggingConfig;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a `fmt` subscriber filtered by `RUST_LOG`, falling back to the
/// configured directives
///
/// Returns `false` when a global subscriber was already installed, in which
/// case nothing changes.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init()
        .is_ok()
}
