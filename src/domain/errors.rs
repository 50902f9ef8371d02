//! # Domain Errors
//!
//! Validation failures raised while constructing domain values.

use crate::domain::value_objects::ArithmeticError;
use thiserror::Error;

/// Error type for domain validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The ticker symbol is malformed.
    #[error("invalid symbol: {0}")]
    InvalidSymbol(String),

    /// The history period token is not part of the vocabulary.
    #[error("invalid period: {0}")]
    InvalidPeriod(String),

    /// A price field holds a value that cannot be quoted.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// Derived figures could not be computed.
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

impl DomainError {
    /// Creates an invalid symbol error.
    #[must_use]
    pub fn invalid_symbol(message: impl Into<String>) -> Self {
        Self::InvalidSymbol(message.into())
    }

    /// Creates an invalid price error.
    #[must_use]
    pub fn invalid_price(message: impl Into<String>) -> Self {
        Self::InvalidPrice(message.into())
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_detail() {
        assert_eq!(
            DomainError::invalid_symbol("symbol cannot be empty").to_string(),
            "invalid symbol: symbol cannot be empty"
        );
        assert_eq!(
            DomainError::InvalidPeriod("2w".to_string()).to_string(),
            "invalid period: 2w"
        );
    }

    #[test]
    fn from_arithmetic_error() {
        let err: DomainError = ArithmeticError::DivisionByZero.into();
        assert!(err.to_string().contains("division by zero"));
    }
}
