//! Configuration errors.

use thiserror::Error;

/// Errors that can occur while loading or validating settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A value is present but unusable.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Dotted key, e.g. `server.port`.
        key: String,
        /// What is wrong with it.
        message: String,
    },

    /// A required value is missing.
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    /// Underlying config crate error.
    #[error("Configuration error: {0}")]
    Source(#[from] ::config::ConfigError),
}

impl ConfigError {
    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates a missing required value error.
    #[must_use]
    pub fn missing(key: impl Into<String>) -> Self {
        Self::MissingRequired(key.into())
    }
}
