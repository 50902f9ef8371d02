//! # Quote Service
//!
//! Cache-aside orchestration between the HTTP handlers, the [`QuoteCache`]
//! and the configured [`QuoteProvider`].
//!
//! Single symbol flow:
//! 1. Normalize the symbol.
//! 2. Serve a fresh cache hit.
//! 3. Otherwise fetch from the provider; on success cache and return it.
//! 4. On failure log and return `None`. Failures are never cached.
//!
//! Batches run the single symbol flow sequentially, in input order, after
//! truncating to the batch limit. A failing symbol is simply omitted.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::config::{ConfigError, QuotesSettings};
use crate::domain::entities::{PriceHistory, QuoteRecord};
use crate::domain::value_objects::{HistoryPeriod, Symbol};
use crate::infrastructure::cache::QuoteCache;
use crate::infrastructure::providers::QuoteProvider;
use std::sync::Arc;
use tracing::{debug, warn};

/// Default maximum number of symbols per batch.
pub const DEFAULT_BATCH_LIMIT: usize = 20;

/// Default popular symbol list.
pub const DEFAULT_POPULAR_SYMBOLS: [&str; 6] = ["AAPL", "MSFT", "GOOGL", "AMZN", "META", "NVDA"];

/// Configuration for [`QuoteService`].
#[derive(Debug, Clone)]
pub struct QuoteServiceConfig {
    /// Maximum number of symbols processed per batch.
    pub batch_limit: usize,
    /// Symbols served by [`QuoteService::popular`], in order.
    pub popular_symbols: Vec<Symbol>,
    /// Period used when a history request names none.
    pub default_period: HistoryPeriod,
}

impl Default for QuoteServiceConfig {
    fn default() -> Self {
        Self {
            batch_limit: DEFAULT_BATCH_LIMIT,
            popular_symbols: DEFAULT_POPULAR_SYMBOLS
                .iter()
                .filter_map(|s| Symbol::new(s).ok())
                .collect(),
            default_period: HistoryPeriod::default(),
        }
    }
}

impl QuoteServiceConfig {
    /// Builds the configuration from loaded settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unparseable symbol or period.
    pub fn from_settings(settings: &QuotesSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            batch_limit: settings.batch_limit.max(1),
            popular_symbols: settings.popular()?,
            default_period: settings.default_period()?,
        })
    }

    /// Sets the batch limit.
    #[must_use]
    pub fn with_batch_limit(mut self, limit: usize) -> Self {
        self.batch_limit = limit.max(1);
        self
    }

    /// Replaces the popular symbol list.
    #[must_use]
    pub fn with_popular_symbols(mut self, symbols: Vec<Symbol>) -> Self {
        self.popular_symbols = symbols;
        self
    }
}

/// Quote lookups with caching.
#[derive(Debug, Clone)]
pub struct QuoteService {
    provider: Arc<dyn QuoteProvider>,
    cache: Arc<QuoteCache>,
    config: QuoteServiceConfig,
}

impl QuoteService {
    /// Creates a service over a provider and a shared cache.
    #[must_use]
    pub fn new(
        provider: Arc<dyn QuoteProvider>,
        cache: Arc<QuoteCache>,
        config: QuoteServiceConfig,
    ) -> Self {
        Self {
            provider,
            cache,
            config,
        }
    }

    /// Returns the configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &QuoteServiceConfig {
        &self.config
    }

    /// Returns the shared cache.
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &Arc<QuoteCache> {
        &self.cache
    }

    /// Returns the quote for `symbol`, or `None` if none could be obtained.
    ///
    /// The symbol is trimmed and upper-cased first, so `"aapl"` and `"AAPL"`
    /// share one cache entry.
    pub async fn quote(&self, symbol: &str) -> Option<QuoteRecord> {
        match Symbol::new(symbol) {
            Ok(symbol) => self.quote_symbol(&symbol).await,
            Err(e) => {
                debug!(raw = symbol, error = %e, "rejected symbol");
                None
            }
        }
    }

    /// Returns the quote for an already normalized symbol.
    pub async fn quote_symbol(&self, symbol: &Symbol) -> Option<QuoteRecord> {
        if let Some(hit) = self.cache.get(symbol) {
            debug!(symbol = %symbol, "cache hit");
            return Some(hit);
        }

        match self.provider.fetch_quote(symbol).await {
            Ok(record) => {
                self.cache.put(symbol.clone(), record.clone());
                Some(record)
            }
            Err(e) => {
                warn!(symbol = %symbol, provider = %self.provider.kind(), error = %e, "quote unavailable");
                None
            }
        }
    }

    /// Returns quotes for up to the configured batch limit of `symbols`.
    pub async fn quotes<S: AsRef<str>>(&self, symbols: &[S]) -> Vec<QuoteRecord> {
        self.quotes_with_limit(symbols, self.config.batch_limit).await
    }

    /// Returns quotes for the first `limit` entries of `symbols`.
    ///
    /// Truncation happens before any lookup. Successful records keep their
    /// input order; failed symbols are omitted.
    pub async fn quotes_with_limit<S: AsRef<str>>(
        &self,
        symbols: &[S],
        limit: usize,
    ) -> Vec<QuoteRecord> {
        if symbols.len() > limit {
            debug!(requested = symbols.len(), limit, "truncating batch");
        }
        let mut records = Vec::with_capacity(symbols.len().min(limit));
        for raw in symbols.iter().take(limit) {
            if let Some(record) = self.quote(raw.as_ref()).await {
                records.push(record);
            }
        }
        records
    }

    /// Returns quotes for the configured popular symbols, skipping failures.
    pub async fn popular(&self) -> Vec<QuoteRecord> {
        let mut records = Vec::with_capacity(self.config.popular_symbols.len());
        for symbol in &self.config.popular_symbols {
            if let Some(record) = self.quote_symbol(symbol).await {
                records.push(record);
            }
        }
        records
    }

    /// Returns daily history for `symbol` over `period` (default period when
    /// `None`). History is not cached.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::Validation` for a malformed symbol or unknown period
    /// - `ApplicationError::Provider` for upstream failures, including
    ///   `NoData` when the series is empty
    pub async fn history(
        &self,
        symbol: &str,
        period: Option<&str>,
    ) -> ApplicationResult<PriceHistory> {
        let symbol = Symbol::new(symbol)?;
        let period = match period {
            Some(raw) => HistoryPeriod::parse(raw)?,
            None => self.config.default_period,
        };

        let points = self
            .provider
            .fetch_history(&symbol, period)
            .await
            .map_err(ApplicationError::from)?;
        debug!(symbol = %symbol, period = %period, bars = points.len(), "history fetched");
        Ok(PriceHistory::new(symbol, period, points))
    }
}
