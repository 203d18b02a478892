//! Telemetry initialisation for the `seal` tool.
//!
//! Logs are flat JSON lines on stderr; stdout carries only command output.
//! A single invocation has no spans worth reporting, so span fields are off.

use std::io;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Parse `log_level` into a filter.
///
/// # Errors
///
/// Returns an error if any directive is malformed, e.g. `seal_cell=loud`.
pub fn level_filter(log_level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(log_level).with_context(|| format!("invalid SEAL_LOG_LEVEL `{log_level}`"))
}

/// Install the global subscriber. `RUST_LOG`, when set and valid, takes
/// precedence over `log_level`.
///
/// # Errors
///
/// Returns an error if `log_level` is malformed or a subscriber is already set.
pub fn init(log_level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => level_filter(log_level)?,
    };

    tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise seal tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_levels_and_directives_parse() {
        for level in ["info", "debug", "warn,seal_cell=trace"] {
            assert!(level_filter(level).is_ok(), "{level}");
        }
    }

    #[test]
    fn malformed_directive_is_rejected() {
        let err = level_filter("seal_cell=loud").unwrap_err();
        assert!(err.to_string().contains("SEAL_LOG_LEVEL"));
    }
}
