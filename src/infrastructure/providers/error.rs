//! # Provider Errors
//!
//! Error types for upstream market data calls.
//!
//! Every failure an adapter can hit (transport, status, parse, or simply
//! "no usable price") is reported through [`ProviderError`], so callers
//! pattern-match on the kind instead of catching anything.
//!
//! # Examples
//!
//! ```
//! use quote_proxy::infrastructure::providers::error::ProviderError;
//!
//! let error = ProviderError::timeout("quote request timed out");
//! assert!(error.is_upstream_unavailable());
//!
//! let error = ProviderError::no_data("AAPL", "no price in response");
//! assert!(error.is_no_data());
//! ```

use crate::domain::DomainError;
use thiserror::Error;

/// Error type for provider adapter operations.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Request timed out.
    #[error("upstream timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// Network or connection error.
    #[error("upstream connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Upstream answered with a non-success status.
    #[error("upstream returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error message or truncated body.
        message: String,
    },

    /// Upstream answered, but without a usable price or with an empty series.
    #[error("no data for {symbol}: {message}")]
    NoData {
        /// Symbol that was requested.
        symbol: String,
        /// What was missing.
        message: String,
    },

    /// Response could not be parsed or had an unexpected shape.
    #[error("upstream protocol error: {message}")]
    Protocol {
        /// Error message.
        message: String,
    },

    /// Request parameters were rejected before any call was made.
    #[error("invalid upstream request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// Adapter could not be set up.
    #[error("provider configuration error: {message}")]
    Configuration {
        /// Error message.
        message: String,
    },
}

impl ProviderError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Creates a no-data error.
    #[must_use]
    pub fn no_data(symbol: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NoData {
            symbol: symbol.into(),
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns true if the upstream could not be reached or refused the call.
    #[must_use]
    pub fn is_upstream_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Connection { .. } | Self::Status { .. }
        )
    }

    /// Returns true if the upstream answered without usable data.
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData { .. })
    }

    /// Returns true if the request itself was invalid.
    #[must_use]
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Self::InvalidRequest { .. })
    }

    /// Returns the HTTP status reported by the upstream, if any.
    #[must_use]
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<DomainError> for ProviderError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::InvalidSymbol(_) | DomainError::InvalidPeriod(_) => {
                Self::invalid_request(error.to_string())
            }
            DomainError::InvalidPrice(_) | DomainError::Arithmetic(_) => {
                Self::protocol(error.to_string())
            }
        }
    }
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
