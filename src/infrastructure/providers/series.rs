//! Column-oriented daily bars, as both vendors return them.

use crate::domain::entities::HistoryPoint;
use crate::domain::value_objects::Timestamp;
use crate::domain::value_objects::arithmetic::decimal_from_f64;

/// Parallel OHLCV columns keyed by bar timestamp (Unix seconds).
///
/// Columns may be shorter than `timestamps` or contain nulls; rows with any
/// missing price are skipped. A missing volume is reported as zero.
#[derive(Debug, Clone, Copy)]
pub struct DailyColumns<'a> {
    /// Bar open times, Unix seconds.
    pub timestamps: &'a [i64],
    /// Opening prices.
    pub open: &'a [Option<f64>],
    /// Session highs.
    pub high: &'a [Option<f64>],
    /// Session lows.
    pub low: &'a [Option<f64>],
    /// Closing prices.
    pub close: &'a [Option<f64>],
    /// Volumes.
    pub volume: &'a [Option<f64>],
    /// Exchange offset from UTC, used to date each bar.
    pub utc_offset_secs: i64,
}

impl DailyColumns<'_> {
    /// Zips the columns into bars, dropping incomplete rows.
    #[must_use]
    pub fn to_points(&self) -> Vec<HistoryPoint> {
        self.timestamps
            .iter()
            .enumerate()
            .filter_map(|(i, ts)| {
                let date = Timestamp::from_secs(*ts)?.date_at_offset(self.utc_offset_secs);
                let open = price_at(self.open, i)?;
                let high = price_at(self.high, i)?;
                let low = price_at(self.low, i)?;
                let close = price_at(self.close, i)?;
                let volume = self
                    .volume
                    .get(i)
                    .copied()
                    .flatten()
                    .filter(|v| v.is_finite() && *v >= 0.0)
                    .map_or(0, |v| v.round() as u64);
                Some(HistoryPoint::new(date, open, high, low, close, volume))
            })
            .collect()
    }
}

fn price_at(column: &[Option<f64>], i: usize) -> Option<rust_decimal::Decimal> {
    column.get(i).copied().flatten().and_then(decimal_from_f64)
}

/// Returns the last non-null close in a series.
#[must_use]
pub fn last_close(close: &[Option<f64>]) -> Option<f64> {
    close.iter().rev().find_map(|c| c.filter(|v| v.is_finite()))
}

/// Orders points by date with one bar per session, then keeps only the
/// newest `limit` sessions when a limit applies.
///
/// A repeated date keeps the bar that arrived last; vendors append the live
/// bar for the current session after the settled one.
pub fn keep_latest(points: &mut Vec<HistoryPoint>, limit: Option<usize>) {
    points.reverse();
    points.sort_by_key(|p| p.date);
    points.dedup_by_key(|p| p.date);
    if let Some(limit) = limit {
        let excess = points.len().saturating_sub(limit);
        points.drain(..excess);
    }
}
