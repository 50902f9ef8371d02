//! # Quote Record
//!
//! The normalized quote every provider is reduced to.
//!
//! This is the wire contract the front-end depends on: field names are fixed
//! camelCase strings and every price-like value is a JSON number rounded to
//! two decimal places.
//!
//! # Examples
//!
//! ```
//! use quote_proxy::domain::entities::QuoteRecordBuilder;
//! use quote_proxy::domain::value_objects::Symbol;
//! use rust_decimal::Decimal;
//!
//! let record = QuoteRecordBuilder::new(Symbol::new("aapl").unwrap(), Decimal::new(19000, 2))
//!     .name("Apple Inc")
//!     .previous_close(Decimal::new(18500, 2))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(record.symbol().as_str(), "AAPL");
//! assert_eq!(record.change(), Decimal::new(500, 2));
//! assert_eq!(record.change_percent(), Decimal::new(270, 2));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::arithmetic::percent_change;
use crate::domain::value_objects::{CheckedArithmetic, Symbol, round_quote};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized stock quote.
///
/// # Invariants
///
/// - `price` is strictly positive
/// - `change == price - previous_close` and
///   `change_percent == change / previous_close * 100` (zero when
///   `previous_close` is not positive), both computed before rounding
/// - `day_high`, `day_low` are `None` rather than zero when unknown
///
/// Records are immutable; a refresh builds a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecord {
    symbol: Symbol,
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    change: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    change_percent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    previous_close: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    day_high: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    day_low: Option<Decimal>,
    volume: Option<u64>,
}

impl QuoteRecord {
    /// Returns the upper-cased symbol.
    #[inline]
    #[must_use]
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Returns the display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current price.
    #[inline]
    #[must_use]
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Returns the absolute change against the previous close.
    #[inline]
    #[must_use]
    pub fn change(&self) -> Decimal {
        self.change
    }

    /// Returns the change in percent of the previous close.
    #[inline]
    #[must_use]
    pub fn change_percent(&self) -> Decimal {
        self.change_percent
    }

    /// Returns the previous session's close.
    #[inline]
    #[must_use]
    pub fn previous_close(&self) -> Decimal {
        self.previous_close
    }

    /// Returns the session high, if known.
    #[inline]
    #[must_use]
    pub fn day_high(&self) -> Option<Decimal> {
        self.day_high
    }

    /// Returns the session low, if known.
    #[inline]
    #[must_use]
    pub fn day_low(&self) -> Option<Decimal> {
        self.day_low
    }

    /// Returns the session volume, if known.
    #[inline]
    #[must_use]
    pub fn volume(&self) -> Option<u64> {
        self.volume
    }
}

impl fmt::Display for QuoteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({:+} / {:+}%)",
            self.symbol, self.price, self.change, self.change_percent
        )
    }
}

/// Builder for [`QuoteRecord`].
///
/// Takes raw, unrounded values; [`build`](Self::build) derives the change
/// figures and applies wire rounding.
#[derive(Debug, Clone)]
pub struct QuoteRecordBuilder {
    symbol: Symbol,
    price: Decimal,
    name: Option<String>,
    previous_close: Option<Decimal>,
    day_high: Option<Decimal>,
    day_low: Option<Decimal>,
    volume: Option<u64>,
}

impl QuoteRecordBuilder {
    /// Starts a record for `symbol` trading at `price`.
    #[must_use]
    pub fn new(symbol: Symbol, price: Decimal) -> Self {
        Self {
            symbol,
            price,
            name: None,
            previous_close: None,
            day_high: None,
            day_low: None,
            volume: None,
        }
    }

    /// Sets the display name. Blank names fall back to the symbol.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the previous close. Defaults to the current price.
    #[must_use]
    pub fn previous_close(mut self, previous_close: Decimal) -> Self {
        self.previous_close = Some(previous_close);
        self
    }

    /// Sets the session high. Non-positive values are treated as unknown.
    #[must_use]
    pub fn day_high(mut self, day_high: Option<Decimal>) -> Self {
        self.day_high = day_high;
        self
    }

    /// Sets the session low. Non-positive values are treated as unknown.
    #[must_use]
    pub fn day_low(mut self, day_low: Option<Decimal>) -> Self {
        self.day_low = day_low;
        self
    }

    /// Sets the session volume.
    #[must_use]
    pub fn volume(mut self, volume: Option<u64>) -> Self {
        self.volume = volume;
        self
    }

    /// Builds the record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if the price is zero or negative,
    /// and `DomainError::Arithmetic` if the derived figures overflow.
    pub fn build(self) -> DomainResult<QuoteRecord> {
        if self.price <= Decimal::ZERO {
            return Err(DomainError::invalid_price(format!(
                "{} has no positive price ({})",
                self.symbol, self.price
            )));
        }

        let previous_close = self.previous_close.unwrap_or(self.price);
        let change = self.price.safe_sub(previous_close)?;
        let change_percent = percent_change(change, previous_close)?;

        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.symbol.to_string());

        Ok(QuoteRecord {
            symbol: self.symbol,
            name,
            price: round_quote(self.price),
            change: round_quote(change),
            change_percent: round_quote(change_percent),
            previous_close: round_quote(previous_close),
            day_high: positive_rounded(self.day_high),
            day_low: positive_rounded(self.day_low),
            volume: self.volume,
        })
    }
}

fn positive_rounded(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| *v > Decimal::ZERO).map(round_quote)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn builder(symbol: &str, price: &str) -> QuoteRecordBuilder {
        QuoteRecordBuilder::new(Symbol::new(symbol).unwrap(), d(price))
    }

    #[test]
    fn derives_change_and_percent() {
        let record = builder("msft", "415.50")
            .previous_close(d("410.00"))
            .build()
            .unwrap();

        assert_eq!(record.symbol().as_str(), "MSFT");
        assert_eq!(record.change(), d("5.50"));
        assert_eq!(record.change_percent(), d("1.34"));
        assert_eq!(record.previous_close(), d("410.00"));
    }

    #[test]
    fn change_uses_unrounded_inputs() {
        // both sides round to 10.00, the raw difference 0.008 rounds to 0.01
        let record = builder("x", "10.004")
            .previous_close(d("9.996"))
            .build()
            .unwrap();

        assert_eq!(record.price(), d("10.00"));
        assert_eq!(record.previous_close(), d("10.00"));
        assert_eq!(record.change(), d("0.01"));
    }

    #[test]
    fn missing_previous_close_defaults_to_price() {
        let record = builder("aapl", "190.12").build().unwrap();
        assert_eq!(record.previous_close(), d("190.12"));
        assert_eq!(record.change(), Decimal::ZERO);
        assert_eq!(record.change_percent(), Decimal::ZERO);
    }

    #[test]
    fn zero_previous_close_gives_zero_percent() {
        let record = builder("aapl", "12.00")
            .previous_close(Decimal::ZERO)
            .build()
            .unwrap();
        assert_eq!(record.change(), d("12.00"));
        assert_eq!(record.change_percent(), Decimal::ZERO);
    }

    #[test]
    fn zero_or_negative_price_is_rejected() {
        assert!(matches!(
            builder("aapl", "0").build(),
            Err(DomainError::InvalidPrice(_))
        ));
        assert!(builder("aapl", "-1").build().is_err());
    }

    #[test]
    fn name_falls_back_to_symbol() {
        let unnamed = builder("nvda", "100").build().unwrap();
        assert_eq!(unnamed.name(), "NVDA");

        let blank = builder("nvda", "100").name("   ").build().unwrap();
        assert_eq!(blank.name(), "NVDA");

        let named = builder("nvda", "100").name("NVIDIA Corp").build().unwrap();
        assert_eq!(named.name(), "NVIDIA Corp");
    }

    #[test]
    fn optional_fields_stay_absent() {
        let record = builder("meta", "500")
            .day_high(Some(Decimal::ZERO))
            .day_low(None)
            .build()
            .unwrap();
        assert_eq!(record.day_high(), None);
        assert_eq!(record.day_low(), None);
        assert_eq!(record.volume(), None);
    }

    #[test]
    fn serializes_wire_contract() {
        let record = builder("aapl", "189.984")
            .name("Apple Inc")
            .previous_close(d("187.5"))
            .day_high(Some(d("190.321")))
            .volume(Some(52_000_000))
            .build()
            .unwrap();

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["symbol"], "AAPL");
        assert_eq!(json["name"], "Apple Inc");
        assert_eq!(json["price"], 189.98);
        assert_eq!(json["change"], 2.48);
        assert_eq!(json["changePercent"], 1.32);
        assert_eq!(json["previousClose"], 187.5);
        assert_eq!(json["dayHigh"], 190.32);
        assert!(json["dayLow"].is_null());
        assert_eq!(json["volume"], 52_000_000);
    }

    proptest! {
        #[test]
        fn change_matches_definition(
            price_cents in 1i64..10_000_000,
            prev_cents in 0i64..10_000_000,
        ) {
            let price = Decimal::new(price_cents, 2);
            let prev = Decimal::new(prev_cents, 2);
            let record = QuoteRecordBuilder::new(Symbol::new("TEST").unwrap(), price)
                .previous_close(prev)
                .build()
                .unwrap();

            prop_assert_eq!(record.change(), price - prev);
            let expected_pct = if prev.is_zero() {
                Decimal::ZERO
            } else {
                round_quote((price - prev) / prev * Decimal::ONE_HUNDRED)
            };
            prop_assert_eq!(record.change_percent(), expected_pct);
        }
    }
}
