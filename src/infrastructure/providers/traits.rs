//! # Quote Provider Trait
//!
//! Port definition for upstream market data vendors.
//!
//! Every vendor integration implements [`QuoteProvider`]. The service layer
//! only ever sees this trait, so the vendor is a startup decision rather than
//! a set of duplicated call sites.
//!
//! # Examples
//!
//! ```ignore
//! use quote_proxy::infrastructure::providers::traits::{ProviderKind, QuoteProvider};
//!
//! #[derive(Debug)]
//! struct MyProvider { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl QuoteProvider for MyProvider {
//!     // ... implement required methods
//! }
//! ```

use crate::domain::entities::{HistoryPoint, QuoteRecord};
use crate::domain::value_objects::{HistoryPeriod, Symbol};
use crate::infrastructure::providers::error::ProviderResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported upstream vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Finnhub REST API (token authenticated).
    #[default]
    Finnhub,
    /// Yahoo Finance chart API.
    Yahoo,
}

impl ProviderKind {
    /// Returns the lowercase vendor name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Finnhub => "finnhub",
            Self::Yahoo => "yahoo",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "finnhub" => Ok(Self::Finnhub),
            "yahoo" => Ok(Self::Yahoo),
            other => Err(format!("unknown provider: {}", other)),
        }
    }
}

/// Trait defining the interface for upstream quote providers.
///
/// # Error Handling
///
/// Implementations never panic on upstream misbehaviour. Every transport,
/// status, parse or "no usable price" condition comes back as a
/// [`ProviderError`](crate::infrastructure::providers::error::ProviderError)
/// so callers can drop the symbol and carry on.
#[async_trait]
pub trait QuoteProvider: Send + Sync + fmt::Debug {
    /// Returns which vendor this adapter talks to.
    fn kind(&self) -> ProviderKind;

    /// Returns the per-call timeout in milliseconds for quote requests.
    fn timeout_ms(&self) -> u64;

    /// Fetches and normalizes the latest quote for `symbol`.
    ///
    /// # Errors
    ///
    /// - `ProviderError::Timeout` / `Connection` / `Status` - upstream unavailable
    /// - `ProviderError::NoData` - upstream answered without a usable price
    /// - `ProviderError::Protocol` - response could not be parsed
    async fn fetch_quote(&self, symbol: &Symbol) -> ProviderResult<QuoteRecord>;

    /// Fetches one daily bar per session covering `period`, oldest first.
    ///
    /// # Errors
    ///
    /// - `ProviderError::NoData` - the series is empty
    /// - any other variant, as for [`fetch_quote`](Self::fetch_quote)
    async fn fetch_history(
        &self,
        symbol: &Symbol,
        period: HistoryPeriod,
    ) -> ProviderResult<Vec<HistoryPoint>>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Finnhub".parse::<ProviderKind>().unwrap(), ProviderKind::Finnhub);
        assert_eq!(" yahoo ".parse::<ProviderKind>().unwrap(), ProviderKind::Yahoo);
        assert!("bloomberg".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn kind_display_and_serde() {
        assert_eq!(ProviderKind::Yahoo.to_string(), "yahoo");
        assert_eq!(
            serde_json::to_string(&ProviderKind::Finnhub).unwrap(),
            "\"finnhub\""
        );
        let kind: ProviderKind = serde_json::from_str("\"yahoo\"").unwrap();
        assert_eq!(kind, ProviderKind::Yahoo);
    }
}
