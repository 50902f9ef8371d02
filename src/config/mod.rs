//! # Configuration
//!
//! Layered settings loaded with the `config` crate:
//!
//! 1. `{dir}/default.toml` (optional)
//! 2. `{dir}/{QUOTE_PROXY_ENV}.toml` (optional, `QUOTE_PROXY_ENV` defaults to `development`)
//! 3. Environment variables prefixed with `QUOTE_PROXY__`, sections separated by `__`
//!
//! ```text
//! QUOTE_PROXY__PROVIDER__API_KEY=xxxx
//! QUOTE_PROXY__CACHE__TTL_SECS=30
//! QUOTE_PROXY__QUOTES__POPULAR_SYMBOLS=AAPL,TSLA
//! ```

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{
    CacheSettings, LoggingSettings, ProviderSettings, QuotesSettings, ServerSettings, Settings,
};
