//! # Structured Logging
//!
//! The library only emits `tracing` events. Whoever embeds it decides where
//! they go; this module is the default wiring for binaries and tests:
//! an `EnvFilter` honoring `RUST_LOG`, and a pretty or JSON fmt layer on
//! stderr.

use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable output for local development.
    Pretty,
    /// JSON lines for log aggregation.
    Json,
}

impl LogFormat {
    /// Accepts "json" (any case); everything else is `Pretty`.
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// A global subscriber was already installed.
#[derive(Debug, Error)]
#[error("logging already initialized: {0}")]
pub struct LoggingInitError(String);

/// Installs the global subscriber, failing if one is already set.
///
/// `default_level` applies when `RUST_LOG` is unset, e.g.
/// `"tally_contracts=debug,tally_protocol=info"`.
pub fn try_init_logging(default_level: &str, format: LogFormat) -> Result<(), LoggingInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let result = match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr).with_target(true))
            .try_init(),
    };
    result.map_err(|e| LoggingInitError(e.to_string()))?;

    tracing::info!(
        version = crate::config::PROTOCOL_VERSION,
        "logging initialized (format={:?})",
        format
    );
    Ok(())
}

/// Installs the global subscriber, ignoring a second call. Convenient in
/// tests, where many cases race to initialize.
pub fn init_logging(default_level: &str, format: LogFormat) {
    let _ = try_init_logging(default_level, format);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parsing_is_lossy() {
        assert_eq!(LogFormat::from_str_lossy("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::from_str_lossy("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str_lossy("anything"), LogFormat::Pretty);
    }

    #[test]
    fn second_init_reports_error() {
        init_logging("tally_protocol=debug", LogFormat::Pretty);
        assert!(try_init_logging("info", LogFormat::Json).is_err());
    }
}
