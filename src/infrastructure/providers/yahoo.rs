//! # Yahoo Finance Provider
//!
//! Adapter for the public Yahoo Finance chart endpoint
//! (`/v8/finance/chart/{symbol}`), which needs no API key.
//!
//! One chart call carries both the quote fields (in `meta`) and the daily
//! bars (in `indicators.quote[0]`). Quotes request a short window so the
//! last close is available as a final price fallback.

use crate::domain::entities::{HistoryPoint, QuoteRecord};
use crate::domain::value_objects::{HistoryPeriod, Symbol};
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::fallback::RawQuote;
use crate::infrastructure::providers::http_client::HttpClient;
use crate::infrastructure::providers::series::{DailyColumns, keep_latest, last_close};
use crate::infrastructure::providers::traits::{ProviderKind, QuoteProvider};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tracing::warn;

/// Default Yahoo Finance API root.
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Yahoo rejects requests without a browser-like agent.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; quote-proxy/0.1)";

/// Window requested for quotes.
const QUOTE_RANGE: &str = "5d";

/// Configuration for [`YahooProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YahooConfig {
    base_url: String,
    user_agent: String,
    timeout_ms: u64,
    history_timeout_ms: u64,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_ms: 5000,
            history_timeout_ms: 10000,
        }
    }
}

impl YahooConfig {
    /// Overrides the API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Overrides the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the quote timeout.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Sets the history timeout.
    #[must_use]
    pub fn with_history_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.history_timeout_ms = timeout_ms;
        self
    }

    /// Returns the API root.
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    regular_market_price: Option<f64>,
    previous_close: Option<f64>,
    chart_previous_close: Option<f64>,
    regular_market_day_high: Option<f64>,
    regular_market_day_low: Option<f64>,
    regular_market_volume: Option<u64>,
    long_name: Option<String>,
    short_name: Option<String>,
    bid: Option<f64>,
    ask: Option<f64>,
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Default, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<OhlcvColumns>,
}

#[derive(Debug, Default, Deserialize)]
struct OhlcvColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

impl ChartEnvelope {
    /// Extracts the single result, mapping vendor errors to `NoData`.
    fn into_result(self, symbol: &Symbol) -> ProviderResult<ChartResult> {
        if let Some(error) = self.chart.error {
            let message = error
                .description
                .or(error.code)
                .unwrap_or_else(|| "chart error".to_string());
            return Err(ProviderError::no_data(symbol.as_str(), message));
        }
        self.chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| ProviderError::no_data(symbol.as_str(), "empty chart result"))
    }
}

impl ChartResult {
    fn columns(&self) -> Option<&OhlcvColumns> {
        self.indicators.quote.first()
    }

    fn into_raw(self) -> RawQuote {
        let history_close = self.columns().and_then(|c| last_close(&c.close));
        let meta = self.meta;
        RawQuote {
            market_price: meta.regular_market_price,
            ask: meta.ask,
            bid: meta.bid,
            history_close,
            previous_close: meta.previous_close,
            chart_previous_close: meta.chart_previous_close,
            long_name: meta.long_name,
            short_name: meta.short_name,
            day_high: meta.regular_market_day_high,
            day_low: meta.regular_market_day_low,
            volume: meta.regular_market_volume,
            ..RawQuote::default()
        }
    }

    fn to_points(&self) -> Vec<HistoryPoint> {
        let Some(columns) = self.columns() else {
            return Vec::new();
        };
        DailyColumns {
            timestamps: &self.timestamp,
            open: &columns.open,
            high: &columns.high,
            low: &columns.low,
            close: &columns.close,
            volume: &columns.volume,
            utc_offset_secs: self.meta.gmtoffset,
        }
        .to_points()
    }
}

/// Yahoo Finance adapter.
#[derive(Debug, Clone)]
pub struct YahooProvider {
    config: YahooConfig,
    client: HttpClient,
    history_client: HttpClient,
}

impl YahooProvider {
    /// Creates the adapter and its HTTP clients.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Configuration` if the user agent is not a
    /// valid header value or an HTTP client cannot be built.
    pub fn new(config: YahooConfig) -> ProviderResult<Self> {
        let agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| ProviderError::configuration(format!("invalid user agent: {}", e)))?;
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, agent);

        let client = HttpClient::with_headers(config.timeout_ms, headers.clone())?;
        let history_client = HttpClient::with_headers(config.history_timeout_ms, headers)?;
        Ok(Self {
            config,
            client,
            history_client,
        })
    }

    async fn chart(
        &self,
        client: &HttpClient,
        symbol: &Symbol,
        range: &str,
    ) -> ProviderResult<ChartResult> {
        let url = format!("{}/v8/finance/chart/{}", self.config.base_url, symbol);
        let params = [("range", range), ("interval", "1d")];
        let envelope: ChartEnvelope = client
            .get_with_params(&url, &params)
            .await
            .map_err(|e| match e.upstream_status() {
                // Unknown symbols come back as 404 with a chart error body.
                Some(404) => ProviderError::no_data(symbol.as_str(), "symbol not found"),
                _ => e,
            })?;
        envelope.into_result(symbol)
    }
}

#[async_trait]
impl QuoteProvider for YahooProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Yahoo
    }

    fn timeout_ms(&self) -> u64 {
        self.client.timeout_ms()
    }

    async fn fetch_quote(&self, symbol: &Symbol) -> ProviderResult<QuoteRecord> {
        self.chart(&self.client, symbol, QUOTE_RANGE)
            .await
            .and_then(|result| result.into_raw().into_record(symbol))
            .inspect_err(|e| warn!(symbol = %symbol, error = %e, "yahoo quote failed"))
    }

    async fn fetch_history(
        &self,
        symbol: &Symbol,
        period: HistoryPeriod,
    ) -> ProviderResult<Vec<HistoryPoint>> {
        let result = self
            .chart(&self.history_client, symbol, period.as_str())
            .await
            .inspect_err(|e| warn!(symbol = %symbol, period = %period, error = %e, "yahoo history failed"))?;

        let mut points = result.to_points();
        keep_latest(&mut points, period.session_limit());
        if points.is_empty() {
            return Err(ProviderError::no_data(symbol.as_str(), "no historical data"));
        }
        Ok(points)
    }
}
