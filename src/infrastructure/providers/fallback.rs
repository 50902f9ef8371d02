//! # Field Fallback Chains
//!
//! Provider-neutral raw quote fields and the ordered extractor chains that
//! turn them into a [`QuoteRecord`].
//!
//! Each adapter fills whatever signals its upstream exposes into a
//! [`RawQuote`]; the chains below then pick the first usable value in a
//! fixed priority order. The order is data, not control flow, so it can be
//! inspected and tested on its own.
//!
//! # Examples
//!
//! ```
//! use quote_proxy::infrastructure::providers::fallback::{RawQuote, resolve_price};
//!
//! let raw = RawQuote {
//!     market_price: None,
//!     bid: Some(99.5),
//!     history_close: Some(98.0),
//!     ..RawQuote::default()
//! };
//!
//! let (source, price) = resolve_price(&raw).unwrap();
//! assert_eq!(source, "bid");
//! assert_eq!(price.to_string(), "99.5");
//! ```

use crate::domain::entities::{QuoteRecord, QuoteRecordBuilder};
use crate::domain::value_objects::Symbol;
use crate::domain::value_objects::arithmetic::decimal_from_f64;
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use rust_decimal::Decimal;

/// Upstream signals for one symbol, before normalization.
///
/// Every field is optional; adapters leave out what their vendor lacks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawQuote {
    /// Live regular-market price.
    pub market_price: Option<f64>,
    /// Last traded price.
    pub last_price: Option<f64>,
    /// Best ask.
    pub ask: Option<f64>,
    /// Best bid.
    pub bid: Option<f64>,
    /// Close of the most recent bar in the daily series.
    pub history_close: Option<f64>,
    /// Previous regular-session close.
    pub previous_close: Option<f64>,
    /// Close preceding the first bar of the returned chart.
    pub chart_previous_close: Option<f64>,
    /// Long-form company name.
    pub long_name: Option<String>,
    /// Short-form company name.
    pub short_name: Option<String>,
    /// Session high.
    pub day_high: Option<f64>,
    /// Session low.
    pub day_low: Option<f64>,
    /// Session volume.
    pub volume: Option<u64>,
}

/// A named accessor over [`RawQuote`].
#[derive(Debug, Clone, Copy)]
pub struct Extractor<T: 'static> {
    /// Name logged when this extractor wins.
    pub source: &'static str,
    /// Reads the field.
    pub extract: fn(&RawQuote) -> Option<T>,
}

fn market_price(raw: &RawQuote) -> Option<f64> {
    raw.market_price
}

fn last_price(raw: &RawQuote) -> Option<f64> {
    raw.last_price
}

fn ask(raw: &RawQuote) -> Option<f64> {
    raw.ask
}

fn bid(raw: &RawQuote) -> Option<f64> {
    raw.bid
}

fn history_close(raw: &RawQuote) -> Option<f64> {
    raw.history_close
}

fn previous_close(raw: &RawQuote) -> Option<f64> {
    raw.previous_close
}

fn chart_previous_close(raw: &RawQuote) -> Option<f64> {
    raw.chart_previous_close
}

fn long_name(raw: &RawQuote) -> Option<String> {
    raw.long_name.clone()
}

fn short_name(raw: &RawQuote) -> Option<String> {
    raw.short_name.clone()
}

/// Current price sources, highest priority first.
pub const PRICE_CHAIN: &[Extractor<f64>] = &[
    Extractor {
        source: "market_price",
        extract: market_price,
    },
    Extractor {
        source: "last_price",
        extract: last_price,
    },
    Extractor {
        source: "ask",
        extract: ask,
    },
    Extractor {
        source: "bid",
        extract: bid,
    },
    Extractor {
        source: "history_close",
        extract: history_close,
    },
];

/// Previous close sources, highest priority first.
pub const PREVIOUS_CLOSE_CHAIN: &[Extractor<f64>] = &[
    Extractor {
        source: "previous_close",
        extract: previous_close,
    },
    Extractor {
        source: "chart_previous_close",
        extract: chart_previous_close,
    },
];

/// Display name sources, highest priority first.
pub const NAME_CHAIN: &[Extractor<String>] = &[
    Extractor {
        source: "long_name",
        extract: long_name,
    },
    Extractor {
        source: "short_name",
        extract: short_name,
    },
];

/// Returns the first value in `chain` that passes `accept`.
fn first_accepted<T>(
    chain: &[Extractor<T>],
    raw: &RawQuote,
    accept: impl Fn(&T) -> bool,
) -> Option<(&'static str, T)> {
    chain.iter().find_map(|extractor| {
        (extractor.extract)(raw)
            .filter(|value| accept(value))
            .map(|value| (extractor.source, value))
    })
}

/// Resolves the current price. Zero, negative and non-finite values count
/// as missing.
#[must_use]
pub fn resolve_price(raw: &RawQuote) -> Option<(&'static str, Decimal)> {
    first_accepted(PRICE_CHAIN, raw, |v| v.is_finite() && *v > 0.0)
        .and_then(|(source, v)| decimal_from_f64(v).map(|d| (source, d)))
}

/// Resolves the previous close. Zero is a legitimate value here.
#[must_use]
pub fn resolve_previous_close(raw: &RawQuote) -> Option<Decimal> {
    first_accepted(PREVIOUS_CLOSE_CHAIN, raw, |v| v.is_finite() && *v >= 0.0)
        .and_then(|(_, v)| decimal_from_f64(v))
}

/// Resolves the display name, skipping blank strings.
#[must_use]
pub fn resolve_name(raw: &RawQuote) -> Option<String> {
    first_accepted(NAME_CHAIN, raw, |n| !n.trim().is_empty()).map(|(_, n)| n)
}

impl RawQuote {
    /// Normalizes the raw fields into a [`QuoteRecord`] for `symbol`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::NoData` if no price source yields a positive
    /// value, and `ProviderError::Protocol` if the figures cannot be derived.
    pub fn into_record(self, symbol: &Symbol) -> ProviderResult<QuoteRecord> {
        let (source, price) = resolve_price(&self)
            .ok_or_else(|| ProviderError::no_data(symbol.as_str(), "no price found"))?;
        tracing::trace!(symbol = %symbol, source, %price, "resolved price");

        let mut builder = QuoteRecordBuilder::new(symbol.clone(), price)
            .day_high(self.day_high.and_then(decimal_from_f64))
            .day_low(self.day_low.and_then(decimal_from_f64))
            .volume(self.volume);

        if let Some(previous_close) = resolve_previous_close(&self) {
            builder = builder.previous_close(previous_close);
        }
        if let Some(name) = resolve_name(&self) {
            builder = builder.name(name);
        }

        Ok(builder.build()?)
    }
}
