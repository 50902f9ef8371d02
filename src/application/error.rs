//! # Application Errors
//!
//! Error types for the application layer.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Validation(String)        - Malformed client input
//! ├── Provider(ProviderError)   - Upstream vendor failures
//! └── Internal(String)          - Anything else
//! ```
//!
//! A vendor answering with no data surfaces as
//! `Provider(ProviderError::NoData { .. })`, which [`ApplicationError::is_not_found`]
//! reports.
//!
//! # Examples
//!
//! ```
//! use quote_proxy::application::error::ApplicationError;
//! use quote_proxy::infrastructure::providers::ProviderError;
//!
//! let err = ApplicationError::validation("symbols must be a list");
//! assert!(err.is_validation());
//!
//! let err: ApplicationError = ProviderError::no_data("ZZZZ", "no price found").into();
//! assert!(err.is_not_found());
//! ```

use crate::domain::errors::DomainError;
use crate::infrastructure::providers::ProviderError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Upstream provider error.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Returns true if the client sent something unusable.
    ///
    /// Provider rejections of the request itself (bad period, bad symbol)
    /// count as validation failures.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Validation(_) => true,
            Self::Provider(e) => e.is_invalid_request(),
            Self::Internal(_) => false,
        }
    }

    /// Returns true if the vendor had nothing to return.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Provider(e) if e.is_no_data())
    }

    /// Returns true if the upstream vendor could not be reached.
    #[must_use]
    pub fn is_upstream_unavailable(&self) -> bool {
        matches!(self, Self::Provider(e) if e.is_upstream_unavailable())
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidSymbol(_) | DomainError::InvalidPeriod(_) => {
                Self::Validation(err.to_string())
            }
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error() {
        let err = ApplicationError::validation("missing symbols");
        assert!(err.is_validation());
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("missing symbols"));
    }

    #[test]
    fn provider_no_data_is_not_found() {
        let err: ApplicationError = ProviderError::no_data("ZZZZ", "empty").into();
        assert!(err.is_not_found());
        assert!(!err.is_validation());
        assert!(!err.is_upstream_unavailable());
    }

    #[test]
    fn provider_invalid_request_is_validation() {
        let err: ApplicationError = ProviderError::invalid_request("bad period").into();
        assert!(err.is_validation());
    }

    #[test]
    fn provider_timeout_is_upstream_unavailable() {
        let err: ApplicationError = ProviderError::timeout("5000ms").into();
        assert!(err.is_upstream_unavailable());
        assert!(!err.is_not_found());
    }

    #[test]
    fn domain_symbol_error_is_validation() {
        let err: ApplicationError = DomainError::invalid_symbol("empty").into();
        assert!(err.is_validation());
    }

    #[test]
    fn domain_price_error_is_internal() {
        let err: ApplicationError = DomainError::invalid_price("negative").into();
        assert!(matches!(err, ApplicationError::Internal(_)));
        assert!(!err.is_not_found());
        assert!(!err.is_validation());
    }
}
