//! # Symbol Value Object
//!
//! Normalized ticker symbol.
//!
//! Every symbol entering the system is trimmed and upper-cased once, here,
//! so cache keys and upstream requests always agree on spelling.
//!
//! # Examples
//!
//! ```
//! use quote_proxy::domain::value_objects::Symbol;
//!
//! let symbol = Symbol::new(" aapl ").unwrap();
//! assert_eq!(symbol.as_str(), "AAPL");
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest ticker accepted from clients.
pub const MAX_SYMBOL_LEN: usize = 32;

/// A ticker symbol, always upper-cased.
///
/// # Invariants
///
/// - Non-empty, at most [`MAX_SYMBOL_LEN`] characters
/// - ASCII alphanumerics plus `.`, `-`, `^`, `=`, `_` and `:` only
///   (covers `BRK.B`, `BRK-B`, `^GSPC`, `EURUSD=X`, `BINANCE:BTCUSDT`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Creates a normalized symbol.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSymbol` if the input is empty, too long,
    /// or contains characters that never appear in a ticker.
    pub fn new(raw: impl AsRef<str>) -> DomainResult<Self> {
        let trimmed = raw.as_ref().trim();

        if trimmed.is_empty() {
            return Err(DomainError::invalid_symbol("symbol cannot be empty"));
        }
        if trimmed.len() > MAX_SYMBOL_LEN {
            return Err(DomainError::invalid_symbol(format!(
                "symbol longer than {} characters",
                MAX_SYMBOL_LEN
            )));
        }
        if let Some(bad) = trimmed.chars().find(|c| !is_symbol_char(*c)) {
            return Err(DomainError::invalid_symbol(format!(
                "unexpected character '{}' in symbol",
                bad
            )));
        }

        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Returns the symbol as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=' | '_' | ':')
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
