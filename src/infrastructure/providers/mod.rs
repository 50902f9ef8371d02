//! # Quote Providers
//!
//! Adapters for upstream market data vendors and the shared plumbing they
//! use: an HTTP client wrapper, the price fallback chains and OHLCV column
//! handling.
//!
//! [`build_provider`] picks the adapter named in configuration.

pub mod error;
pub mod fallback;
pub mod finnhub;
pub mod http_client;
pub mod series;
pub mod traits;
pub mod yahoo;

pub use error::{ProviderError, ProviderResult};
pub use finnhub::{FinnhubConfig, FinnhubProvider};
pub use http_client::HttpClient;
pub use traits::{ProviderKind, QuoteProvider};
pub use yahoo::{YahooConfig, YahooProvider};

use crate::config::ProviderSettings;
use std::sync::Arc;

/// Builds the configured provider.
///
/// # Errors
///
/// Returns `ProviderError::Configuration` if Finnhub is selected without an
/// API key or a client cannot be built.
pub fn build_provider(settings: &ProviderSettings) -> ProviderResult<Arc<dyn QuoteProvider>> {
    match settings.kind {
        ProviderKind::Finnhub => {
            let api_key = settings
                .api_key
                .clone()
                .ok_or_else(|| ProviderError::configuration("finnhub requires an api key"))?;
            let mut config = FinnhubConfig::new(api_key)
                .with_timeout_ms(settings.timeout_ms)
                .with_history_timeout_ms(settings.history_timeout_ms);
            if let Some(base_url) = &settings.base_url {
                config = config.with_base_url(base_url.as_str());
            }
            Ok(Arc::new(FinnhubProvider::new(config)?))
        }
        ProviderKind::Yahoo => {
            let mut config = YahooConfig::default()
                .with_timeout_ms(settings.timeout_ms)
                .with_history_timeout_ms(settings.history_timeout_ms);
            if let Some(base_url) = &settings.base_url {
                config = config.with_base_url(base_url.as_str());
            }
            Ok(Arc::new(YahooProvider::new(config)?))
        }
    }
}
