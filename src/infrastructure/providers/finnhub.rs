//! # Finnhub Provider
//!
//! Adapter for the Finnhub REST API.
//!
//! A quote costs two upstream calls: `/quote` for the price fields and
//! `/stock/profile2` for the company name. The profile call is best-effort;
//! if it fails the name falls back to the symbol. History comes from
//! `/stock/candle` with daily resolution.
//!
//! # Examples
//!
//! ```
//! use quote_proxy::infrastructure::providers::finnhub::{FinnhubConfig, FinnhubProvider};
//!
//! let config = FinnhubConfig::new("my-api-key").with_timeout_ms(3000);
//! let provider = FinnhubProvider::new(config).unwrap();
//! ```

use crate::domain::entities::{HistoryPoint, QuoteRecord};
use crate::domain::value_objects::{HistoryPeriod, Symbol};
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::fallback::RawQuote;
use crate::infrastructure::providers::http_client::HttpClient;
use crate::infrastructure::providers::series::{DailyColumns, keep_latest};
use crate::infrastructure::providers::traits::{ProviderKind, QuoteProvider};
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, warn};

/// Default Finnhub API root.
pub const DEFAULT_FINNHUB_BASE_URL: &str = "https://finnhub.io/api/v1";

/// Default quote/profile timeout in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Default candle timeout in milliseconds.
const DEFAULT_HISTORY_TIMEOUT_MS: u64 = 10000;

/// Configuration for [`FinnhubProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinnhubConfig {
    base_url: String,
    api_key: String,
    timeout_ms: u64,
    history_timeout_ms: u64,
}

impl FinnhubConfig {
    /// Creates a configuration with default endpoint and timeouts.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_FINNHUB_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            history_timeout_ms: DEFAULT_HISTORY_TIMEOUT_MS,
        }
    }

    /// Overrides the API root (tests point this at a mock server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the quote/profile timeout.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Sets the candle timeout.
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

/// `/quote` payload. Finnhub answers unknown symbols with all zeros.
#[derive(Debug, Clone, Default, Deserialize)]
struct FinnhubQuote {
    /// Current price.
    c: Option<f64>,
    /// Session high.
    h: Option<f64>,
    /// Session low.
    l: Option<f64>,
    /// Previous close.
    pc: Option<f64>,
}

/// `/stock/profile2` payload. Empty object for unknown symbols.
#[derive(Debug, Clone, Default, Deserialize)]
struct FinnhubProfile {
    name: Option<String>,
    ticker: Option<String>,
}

/// `/stock/candle` payload.
#[derive(Debug, Clone, Default, Deserialize)]
struct FinnhubCandles {
    /// `"ok"` or `"no_data"`.
    s: String,
    #[serde(default)]
    t: Vec<i64>,
    #[serde(default)]
    o: Vec<f64>,
    #[serde(default)]
    h: Vec<f64>,
    #[serde(default)]
    l: Vec<f64>,
    #[serde(default)]
    c: Vec<f64>,
    #[serde(default)]
    v: Vec<f64>,
}

impl FinnhubQuote {
    fn into_raw(self, profile: Option<FinnhubProfile>) -> RawQuote {
        let (long_name, short_name) = profile
            .map(|p| (p.name, p.ticker))
            .unwrap_or((None, None));
        RawQuote {
            market_price: self.c,
            previous_close: self.pc,
            day_high: self.h,
            day_low: self.l,
            long_name,
            short_name,
            ..RawQuote::default()
        }
    }
}

/// Finnhub adapter.
#[derive(Debug, Clone)]
pub struct FinnhubProvider {
    config: FinnhubConfig,
    client: HttpClient,
    history_client: HttpClient,
}

impl FinnhubProvider {
    /// Creates the adapter and its HTTP clients.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Configuration` if the API key is blank or an
    /// HTTP client cannot be built.
    pub fn new(config: FinnhubConfig) -> ProviderResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::configuration("finnhub requires an api key"));
        }
        let client = HttpClient::new(config.timeout_ms)?;
        let history_client = HttpClient::new(config.history_timeout_ms)?;
        Ok(Self {
            config,
            client,
            history_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn fetch_profile(&self, symbol: &Symbol) -> Option<FinnhubProfile> {
        let params = [
            ("symbol", symbol.as_str()),
            ("token", self.config.api_key.as_str()),
        ];
        match self
            .client
            .get_with_params::<FinnhubProfile, _>(&self.url("/stock/profile2"), &params)
            .await
        {
            Ok(profile) => Some(profile),
            Err(e) => {
                debug!(symbol = %symbol, error = %e, "profile lookup failed, name falls back to symbol");
                None
            }
        }
    }
}

#[async_trait]
impl QuoteProvider for FinnhubProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Finnhub
    }

    fn timeout_ms(&self) -> u64 {
        self.client.timeout_ms()
    }

    async fn fetch_quote(&self, symbol: &Symbol) -> ProviderResult<QuoteRecord> {
        let params = [
            ("symbol", symbol.as_str()),
            ("token", self.config.api_key.as_str()),
        ];
        let quote: FinnhubQuote = self
            .client
            .get_with_params(&self.url("/quote"), &params)
            .await
            .inspect_err(|e| warn!(symbol = %symbol, error = %e, "finnhub quote request failed"))?;

        // Skip the profile round-trip when there is nothing to name.
        if !quote.c.is_some_and(|c| c.is_finite() && c > 0.0) {
            warn!(symbol = %symbol, "finnhub returned no price");
            return Err(ProviderError::no_data(symbol.as_str(), "no price found"));
        }

        let profile = self.fetch_profile(symbol).await;
        quote
            .into_raw(profile)
            .into_record(symbol)
            .inspect_err(|e| warn!(symbol = %symbol, error = %e, "finnhub quote normalization failed"))
    }

    async fn fetch_history(
        &self,
        symbol: &Symbol,
        period: HistoryPeriod,
    ) -> ProviderResult<Vec<HistoryPoint>> {
        let now = Utc::now();
        let from = period
            .start_date(now.date_naive())
            .and_hms_opt(0, 0, 0)
            .map_or(0, |dt| dt.and_utc().timestamp());
        let from = from.to_string();
        let to = now.timestamp().to_string();
        let params = [
            ("symbol", symbol.as_str()),
            ("resolution", "D"),
            ("from", from.as_str()),
            ("to", to.as_str()),
            ("token", self.config.api_key.as_str()),
        ];

        let candles: FinnhubCandles = self
            .history_client
            .get_with_params(&self.url("/stock/candle"), &params)
            .await
            .inspect_err(|e| warn!(symbol = %symbol, period = %period, error = %e, "finnhub candle request failed"))?;

        if candles.s != "ok" {
            return Err(ProviderError::no_data(
                symbol.as_str(),
                format!("no historical data (status {})", candles.s),
            ));
        }

        let wrap = |col: &[f64]| col.iter().copied().map(Some).collect::<Vec<_>>();
        let (open, high, low, close, volume) = (
            wrap(&candles.o),
            wrap(&candles.h),
            wrap(&candles.l),
            wrap(&candles.c),
            wrap(&candles.v),
        );
        let mut points = DailyColumns {
            timestamps: &candles.t,
            open: &open,
            high: &high,
            low: &low,
            close: &close,
            volume: &volume,
            utc_offset_secs: 0,
        }
        .to_points();
        keep_latest(&mut points, period.session_limit());

        if points.is_empty() {
            return Err(ProviderError::no_data(symbol.as_str(), "no historical data"));
        }
        Ok(points)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = FinnhubConfig::new("key");
        assert_eq!(config.base_url(), DEFAULT_FINNHUB_BASE_URL);
        assert_eq!(config.timeout_ms, 5000);
        assert_eq!(config.history_timeout_ms, 10000);
    }

    #[test]
    fn config_trims_trailing_slash() {
        let config = FinnhubConfig::new("key").with_base_url("http://localhost:1234/");
        assert_eq!(config.base_url(), "http://localhost:1234");
    }

    #[test]
    fn blank_api_key_is_rejected() {
        let err = FinnhubProvider::new(FinnhubConfig::new("  ")).unwrap_err();
        assert!(matches!(err, ProviderError::Configuration { .. }));
    }

    #[test]
    fn quote_maps_to_raw_fields() {
        let quote = FinnhubQuote {
            c: Some(10.0),
            h: Some(11.0),
            l: Some(9.0),
            pc: Some(9.5),
        };
        let profile = FinnhubProfile {
            name: Some("Acme Corp".to_string()),
            ticker: Some("ACME".to_string()),
        };
        let raw = quote.into_raw(Some(profile));

        assert_eq!(raw.market_price, Some(10.0));
        assert_eq!(raw.previous_close, Some(9.5));
        assert_eq!(raw.long_name.as_deref(), Some("Acme Corp"));
        assert_eq!(raw.short_name.as_deref(), Some("ACME"));
        assert_eq!(raw.volume, None);
    }

    #[test]
    fn empty_profile_payload_parses() {
        let profile: FinnhubProfile = serde_json::from_str("{}").unwrap();
        assert!(profile.name.is_none());
    }

    #[test]
    fn no_data_candles_parse() {
        let candles: FinnhubCandles = serde_json::from_str(r#"{"s":"no_data"}"#).unwrap();
        assert_eq!(candles.s, "no_data");
        assert!(candles.t.is_empty());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod http_tests {
    use super::*;
    use rust_decimal::Decimal;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn provider(server: &MockServer) -> FinnhubProvider {
        FinnhubProvider::new(FinnhubConfig::new("test-key").with_base_url(server.uri())).unwrap()
    }

    fn aapl() -> Symbol {
        Symbol::new("AAPL").unwrap()
    }

    #[tokio::test]
    async fn fetch_quote_combines_quote_and_profile() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quote"))
            .and(query_param("symbol", "AAPL"))
            .and(query_param("token", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "c": 189.984, "d": 2.48, "dp": 1.32, "h": 190.5, "l": 187.1,
                "o": 188.0, "pc": 187.5, "t": 1_704_153_600
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/stock/profile2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "Apple Inc", "ticker": "AAPL"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let record = provider(&server).await.fetch_quote(&aapl()).await.unwrap();

        assert_eq!(record.name(), "Apple Inc");
        assert_eq!(record.price(), Decimal::new(18998, 2));
        assert_eq!(record.change(), Decimal::new(248, 2));
        assert_eq!(record.previous_close(), Decimal::new(18750, 2));
        assert_eq!(record.volume(), None);
    }

    #[tokio::test]
    async fn profile_failure_falls_back_to_symbol() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quote"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "c": 10.0, "h": 0.0, "l": 0.0, "pc": 9.0
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/stock/profile2"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let record = provider(&server).await.fetch_quote(&aapl()).await.unwrap();

        assert_eq!(record.name(), "AAPL");
        assert_eq!(record.day_high(), None);
        assert_eq!(record.day_low(), None);
    }

    #[tokio::test]
    async fn zero_price_is_no_data_without_profile_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quote"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "c": 0, "d": null, "dp": null, "h": 0, "l": 0, "o": 0, "pc": 0, "t": 0
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/stock/profile2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let err = provider(&server).await.fetch_quote(&aapl()).await.unwrap_err();

        assert!(err.is_no_data());
    }

    #[tokio::test]
    async fn upstream_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quote"))
            .respond_with(ResponseTemplate::new(429).set_body_string("API limit reached"))
            .mount(&server)
            .await;

        let err = provider(&server).await.fetch_quote(&aapl()).await.unwrap_err();

        assert_eq!(err.upstream_status(), Some(429));
    }

    #[tokio::test]
    async fn fetch_history_builds_sorted_points() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stock/candle"))
            .and(query_param("resolution", "D"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "s": "ok",
                "t": [1_704_153_600, 1_704_240_000],
                "o": [100.0, 101.0],
                "h": [102.0, 103.0],
                "l": [99.0, 100.5],
                "c": [101.5, 102.25],
                "v": [1000.0, 2000.0]
            })))
            .mount(&server)
            .await;

        let points = provider(&server)
            .await
            .fetch_history(&aapl(), HistoryPeriod::OneMonth)
            .await
            .unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date.to_string(), "2024-01-02");
        assert_eq!(points[1].close, Decimal::new(10225, 2));
        assert_eq!(points[1].volume, 2000);
    }

    #[tokio::test]
    async fn fetch_history_one_day_keeps_latest_bar() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stock/candle"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "s": "ok",
                "t": [1_704_153_600, 1_704_240_000],
                "o": [100.0, 101.0],
                "h": [102.0, 103.0],
                "l": [99.0, 100.5],
                "c": [101.5, 102.25],
                "v": [1000.0, 2000.0]
            })))
            .mount(&server)
            .await;

        let points = provider(&server)
            .await
            .fetch_history(&aapl(), HistoryPeriod::OneDay)
            .await
            .unwrap();

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date.to_string(), "2024-01-03");
    }

    #[tokio::test]
    async fn fetch_history_no_data_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stock/candle"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"s": "no_data"})))
            .mount(&server)
            .await;

        let err = provider(&server)
            .await
            .fetch_history(&aapl(), HistoryPeriod::OneYear)
            .await
            .unwrap_err();

        assert!(err.is_no_data());
    }
}
