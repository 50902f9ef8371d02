//! # Logging
//!
//! `tracing` subscriber setup with three output formats:
//! - **pretty**: multi-line, colored, for development
//! - **json**: one object per line, for log aggregation
//! - **compact**: single-line text
//!
//! The level comes from `RUST_LOG` when set, otherwise from configuration.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use tracing_subscriber::{EnvFilter, fmt as tfmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, colored.
    #[default]
    Pretty,
    /// Structured JSON lines.
    Json,
    /// Condensed single line.
    Compact,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
            Self::Compact => "compact",
        };
        f.write_str(name)
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// Error raised when the subscriber cannot be installed.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The level directive did not parse.
    #[error("invalid log filter '{directive}': {message}")]
    InvalidFilter {
        /// Directive as configured.
        directive: String,
        /// Parser message.
        message: String,
    },
    /// A global subscriber is already set.
    #[error("failed to install subscriber: {0}")]
    Install(String),
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns `LoggingError` if `level` is not a valid filter directive or a
/// subscriber was already installed.
pub fn init_logging(level: &str, format: LogFormat) -> Result<(), LoggingError> {
    let env_filter = build_filter(level)?;
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match format {
        LogFormat::Pretty => registry.with(tfmt::layer().pretty().with_target(true)).try_init(),
        LogFormat::Json => registry
            .with(tfmt::layer().json().with_current_span(true))
            .try_init(),
        LogFormat::Compact => registry.with(tfmt::layer().compact()).try_init(),
    };
    installed.map_err(|e| LoggingError::Install(e.to_string()))?;

    tracing::debug!(%format, level, "logging initialized");
    Ok(())
}

fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(level).map_err(|e| LoggingError::InvalidFilter {
            directive: level.to_string(),
            message: e.to_string(),
        })
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn log_format_from_str() {
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn log_format_display_round_trips() {
        for format in [LogFormat::Pretty, LogFormat::Json, LogFormat::Compact] {
            assert_eq!(format.to_string().parse::<LogFormat>().unwrap(), format);
        }
    }

    #[test]
    fn accepts_module_directives() {
        assert!(EnvFilter::try_new("info,quote_proxy=debug").is_ok());
    }
}
