//! # Price History
//!
//! Daily OHLCV bars returned by the history endpoint.

use crate::domain::value_objects::{HistoryPeriod, Symbol, round_quote};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One trading session.
///
/// Prices are rounded to two decimal places on construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// Session date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Opening price.
    #[serde(with = "rust_decimal::serde::float")]
    pub open: Decimal,
    /// Session high.
    #[serde(with = "rust_decimal::serde::float")]
    pub high: Decimal,
    /// Session low.
    #[serde(with = "rust_decimal::serde::float")]
    pub low: Decimal,
    /// Closing price.
    #[serde(with = "rust_decimal::serde::float")]
    pub close: Decimal,
    /// Shares traded.
    pub volume: u64,
}

impl HistoryPoint {
    /// Creates a bar, rounding every price.
    #[must_use]
    pub fn new(
        date: NaiveDate,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: u64,
    ) -> Self {
        Self {
            date,
            open: round_quote(open),
            high: round_quote(high),
            low: round_quote(low),
            close: round_quote(close),
            volume,
        }
    }
}

/// History response body: `{"symbol", "period", "data": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceHistory {
    /// Upper-cased symbol.
    pub symbol: Symbol,
    /// Period the bars cover.
    pub period: HistoryPeriod,
    /// Bars in chronological order, one per session.
    pub data: Vec<HistoryPoint>,
}

impl PriceHistory {
    /// Creates a history, ordering bars chronologically and keeping the
    /// last bar seen for any repeated date.
    #[must_use]
    pub fn new(symbol: Symbol, period: HistoryPeriod, mut data: Vec<HistoryPoint>) -> Self {
        data.reverse();
        data.sort_by_key(|p| p.date);
        data.dedup_by_key(|p| p.date);
        Self {
            symbol,
            period,
            data,
        }
    }

    /// Returns true if there are no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns the most recent bar.
    #[must_use]
    pub fn latest(&self) -> Option<&HistoryPoint> {
        self.data.last()
    }
}
