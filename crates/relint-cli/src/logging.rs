//! Logging setup for the validator CLI.
//!
//! All diagnostics go through `tracing` to stderr; stdout is reserved for
//! the summary table so the two streams can be redirected independently.
//!
//! # Log Levels
//!
//! - `error`: fatal environment problems
//! - `warn`: recoverable validation findings worth operator attention
//! - `info`: per-file scan progress and digest sizes
//! - `debug`: surjection set sizes and other internals

use std::io;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Configuration for the global subscriber.
#[derive(Debug, Clone, Copy)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    pub with_ansi: bool,
}

/// Initialize the global tracing subscriber. Call once at startup.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) {
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(false)
        .without_time();
    tracing_subscriber::registry()
        .with(build_env_filter(config.level_filter))
        .with(layer)
        .init();
}

fn build_env_filter(level: LevelFilter) -> EnvFilter {
    // RUST_LOG overrides the flag-derived level. External crates stay at
    // warn to reduce noise.
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.to_string().to_lowercase();
        EnvFilter::new(format!(
            "warn,relint_cli={level},relint_engine={level},relint_ingest={level},relint_model={level}"
        ))
    })
}
