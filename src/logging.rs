// src/logging.rs

//! Subscriber setup.
//!
//! The level comes from `--log-level` when given, then from `MPVSTREAM_LOG`,
//! and is `info` otherwise. Everything is written to stderr: stdout belongs
//! to the player's output stream.

use std::str::FromStr;

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Environment variable consulted when no `--log-level` is passed.
pub const LOG_ENV_VAR: &str = "MPVSTREAM_LOG";

/// Install the global fmt subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_level = std::env::var(LOG_ENV_VAR).ok();
    let level = effective_level(cli_level, env_level.as_deref());

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))?;

    Ok(())
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// An unparsable env value is ignored rather than rejected.
fn effective_level(cli_level: Option<LogLevel>, env_level: Option<&str>) -> Level {
    cli_level
        .map(Level::from)
        .or_else(|| env_level.and_then(level_from_env))
        .unwrap_or(Level::INFO)
}

fn level_from_env(value: &str) -> Option<Level> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("warning") {
        return Some(Level::WARN);
    }
    Level::from_str(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_environment() {
        assert_eq!(effective_level(Some(LogLevel::Debug), Some("trace")), Level::DEBUG);
        assert_eq!(effective_level(None, Some(" TRACE ")), Level::TRACE);
        assert_eq!(effective_level(None, Some("warning")), Level::WARN);
    }

    #[test]
    fn unknown_environment_value_falls_back_to_info() {
        assert_eq!(effective_level(None, Some("loud")), Level::INFO);
        assert_eq!(effective_level(None, None), Level::INFO);
    }
}
