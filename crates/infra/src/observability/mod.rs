//! Tracing subscriber setup
//!
//! The client logs through `tracing` everywhere. Binaries (and tests that
//! want output) call [`init_tracing`] once to install a formatter.

use std::io::IsTerminal;

use moodlog_domain::{ApiError, LoggingConfig, Result};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `config.filter` when set. Output goes to stderr,
/// as JSON lines when `config.json` is true.
///
/// # Errors
/// Returns `ApiError::Config` if the filter directives are invalid or a
/// global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;

    let installed = if config.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .try_init()
    };

    installed.map_err(|e| ApiError::Config(format!("Failed to install tracing subscriber: {e}")))?;
    tracing::debug!(filter = %config.filter, json = config.json, "tracing initialised");
    Ok(())
}

fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives),
        _ => EnvFilter::try_new(&config.filter),
    }
    .map_err(|e| ApiError::Config(format!("Invalid log filter: {e}")))
}
