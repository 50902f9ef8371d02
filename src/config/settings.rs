//! Settings structures.

use super::error::ConfigError;
use crate::domain::value_objects::{HistoryPeriod, Symbol};
use crate::infrastructure::providers::ProviderKind;
use crate::logging::LogFormat;
use ::config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// Environment variable selecting the per-environment config file.
pub const ENV_SELECTOR: &str = "QUOTE_PROXY_ENV";

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "QUOTE_PROXY";

/// Main application settings.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    /// HTTP listener.
    #[serde(default)]
    pub server: ServerSettings,
    /// Upstream market data provider.
    #[serde(default)]
    pub provider: ProviderSettings,
    /// Quote cache.
    #[serde(default)]
    pub cache: CacheSettings,
    /// Quote service behavior.
    #[serde(default)]
    pub quotes: QuotesSettings,
    /// Log output.
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Settings {
    /// Loads settings from `config_dir` and the environment.
    ///
    /// The result is not validated. Callers apply their own overrides first and
    /// then call [`validate`](Self::validate) on the final settings.
    ///
    /// Later sources override earlier ones:
    /// 1. `{config_dir}/default.toml`
    /// 2. `{config_dir}/{QUOTE_PROXY_ENV}.toml`
    /// 3. `QUOTE_PROXY__SECTION__KEY` environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed.
    pub fn load(config_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = config_dir.as_ref();
        let env = std::env::var(ENV_SELECTOR).unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::from(dir.join("default")).required(false))
            .add_source(File::from(dir.join(&env)).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("quotes.popular_symbols"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Parses settings from a TOML document and validates them.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the document cannot be parsed or validation fails.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks cross-field constraints the types cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::invalid_value("server.port", "must be non-zero"));
        }
        self.server.socket_addr()?;
        if self.quotes.batch_limit == 0 {
            return Err(ConfigError::invalid_value(
                "quotes.batch_limit",
                "must be at least 1",
            ));
        }
        if self.provider.kind == ProviderKind::Finnhub
            && self.provider.api_key.as_deref().is_none_or(|k| k.trim().is_empty())
        {
            return Err(ConfigError::missing("provider.api_key"));
        }
        if self.provider.timeout_ms == 0 || self.provider.history_timeout_ms == 0 {
            return Err(ConfigError::invalid_value(
                "provider.timeout_ms",
                "timeouts must be non-zero",
            ));
        }
        self.quotes.popular()?;
        self.quotes.default_period()?;
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    /// Bind host.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allow any origin.
    #[serde(default = "default_true")]
    pub cors_permissive: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_permissive: true,
        }
    }
}

impl ServerSettings {
    /// Returns the bind address.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `host:port` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::invalid_value("server.host", format!("{}", e)))
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_true() -> bool {
    true
}

/// Upstream provider settings.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderSettings {
    /// Which vendor to call.
    #[serde(default)]
    pub kind: ProviderKind,
    /// API root; the vendor default when unset.
    #[serde(default)]
    pub base_url: Option<String>,
    /// API key (Finnhub only).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Quote request timeout.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// History request timeout.
    #[serde(default = "default_history_timeout_ms")]
    pub history_timeout_ms: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            base_url: None,
            api_key: None,
            timeout_ms: default_timeout_ms(),
            history_timeout_ms: default_history_timeout_ms(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_history_timeout_ms() -> u64 {
    10000
}

/// Cache settings.
#[derive(Debug, Deserialize, Clone)]
pub struct CacheSettings {
    /// Maximum age of a served entry.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl CacheSettings {
    /// Returns the TTL as a duration.
    #[inline]
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

fn default_ttl_secs() -> u64 {
    15
}

/// Quote service settings.
#[derive(Debug, Deserialize, Clone)]
pub struct QuotesSettings {
    /// Most symbols served per batch request.
    #[serde(default = "default_batch_limit")]
    pub batch_limit: usize,
    /// Symbols served by the popular endpoint, in order.
    #[serde(default = "default_popular_symbols")]
    pub popular_symbols: Vec<String>,
    /// Period used when a history request names none.
    #[serde(default = "default_history_period")]
    pub default_history_period: String,
}

impl Default for QuotesSettings {
    fn default() -> Self {
        Self {
            batch_limit: default_batch_limit(),
            popular_symbols: default_popular_symbols(),
            default_history_period: default_history_period(),
        }
    }
}

impl QuotesSettings {
    /// Parses the popular symbol list.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first bad symbol.
    pub fn popular(&self) -> Result<Vec<Symbol>, ConfigError> {
        self.popular_symbols
            .iter()
            .map(|raw| {
                Symbol::new(raw).map_err(|e| {
                    ConfigError::invalid_value("quotes.popular_symbols", e.to_string())
                })
            })
            .collect()
    }

    /// Parses the default history period.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the token is unknown.
    pub fn default_period(&self) -> Result<HistoryPeriod, ConfigError> {
        HistoryPeriod::parse(&self.default_history_period).map_err(|e| {
            ConfigError::invalid_value("quotes.default_history_period", e.to_string())
        })
    }
}

fn default_batch_limit() -> usize {
    20
}

fn default_popular_symbols() -> Vec<String> {
    ["AAPL", "MSFT", "GOOGL", "AMZN", "META", "NVDA"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_history_period() -> String {
    HistoryPeriod::default().as_str().to_string()
}

/// Logging settings.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    /// Filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const FINNHUB_MINIMAL: &str = r#"
        [provider]
        api_key = "test-key"
    "#;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 5001);
        assert!(settings.server.cors_permissive);
        assert_eq!(settings.provider.kind, ProviderKind::Finnhub);
        assert_eq!(settings.provider.timeout_ms, 5000);
        assert_eq!(settings.cache.ttl(), Duration::from_secs(15));
        assert_eq!(settings.quotes.batch_limit, 20);
        assert_eq!(settings.quotes.popular_symbols.len(), 6);
        assert_eq!(settings.quotes.default_period().unwrap(), HistoryPeriod::OneMonth);
        assert_eq!(settings.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn minimal_document_fills_defaults() {
        let settings = Settings::from_toml(FINNHUB_MINIMAL).unwrap();
        assert_eq!(settings.provider.api_key.as_deref(), Some("test-key"));
        assert_eq!(settings.server.socket_addr().unwrap().port(), 5001);
        assert_eq!(settings.cache.ttl_secs, 15);
    }

    #[test]
    fn full_document() {
        let settings = Settings::from_toml(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            cors_permissive = false

            [provider]
            kind = "yahoo"
            base_url = "http://localhost:9999"
            timeout_ms = 2500

            [cache]
            ttl_secs = 60

            [quotes]
            batch_limit = 5
            popular_symbols = ["tsla", "spy"]
            default_history_period = "6mo"

            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(settings.server.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert!(!settings.server.cors_permissive);
        assert_eq!(settings.provider.kind, ProviderKind::Yahoo);
        assert_eq!(settings.provider.history_timeout_ms, 10000);
        assert_eq!(settings.cache.ttl_secs, 60);
        let popular: Vec<String> = settings
            .quotes
            .popular()
            .unwrap()
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(popular, vec!["TSLA", "SPY"]);
        assert_eq!(settings.quotes.default_period().unwrap(), HistoryPeriod::SixMonths);
        assert_eq!(settings.logging.format, LogFormat::Json);
    }

    #[test]
    fn finnhub_requires_api_key() {
        let err = Settings::from_toml("").unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(ref key) if key == "provider.api_key"));
    }

    #[test]
    fn yahoo_needs_no_api_key() {
        assert!(Settings::from_toml("[provider]\nkind = \"yahoo\"").is_ok());
    }

    #[test]
    fn rejects_zero_port() {
        let err = Settings::from_toml(&format!("{}\n[server]\nport = 0", FINNHUB_MINIMAL)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "server.port"));
    }

    #[test]
    fn rejects_zero_batch_limit() {
        let err =
            Settings::from_toml(&format!("{}\n[quotes]\nbatch_limit = 0", FINNHUB_MINIMAL)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "quotes.batch_limit"));
    }

    #[test]
    fn rejects_bad_popular_symbol() {
        let err = Settings::from_toml(&format!(
            "{}\n[quotes]\npopular_symbols = [\"AAPL\", \"bad symbol!\"]",
            FINNHUB_MINIMAL
        ))
        .unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "quotes.popular_symbols")
        );
    }

    #[test]
    fn rejects_unknown_period() {
        let err = Settings::from_toml(&format!(
            "{}\n[quotes]\ndefault_history_period = \"2w\"",
            FINNHUB_MINIMAL
        ))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn rejects_unknown_provider_kind() {
        let err = Settings::from_toml("[provider]\nkind = \"bloomberg\"").unwrap_err();
        assert!(matches!(err, ConfigError::Source(_)));
    }

    #[test]
    fn load_reads_default_file() {
        let dir = std::env::temp_dir().join(format!("quote-proxy-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("default.toml"),
            "[provider]\nkind = \"yahoo\"\n[cache]\nttl_secs = 42\n",
        )
        .unwrap();

        let settings = Settings::load(&dir).unwrap();

        assert_eq!(settings.provider.kind, ProviderKind::Yahoo);
        assert_eq!(settings.cache.ttl_secs, 42);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_leaves_validation_to_caller() {
        let dir = std::env::temp_dir().join(format!(
            "quote-proxy-config-override-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("default.toml"),
            "[server]\nport = 0\n[provider]\nkind = \"yahoo\"\n",
        )
        .unwrap();

        let mut settings = Settings::load(&dir).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();
        assert!(settings.validate().is_err());

        settings.server.port = 8080;
        settings.validate().unwrap();
    }
}
