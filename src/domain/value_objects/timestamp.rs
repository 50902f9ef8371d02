//! # Timestamp Value Object
//!
//! DateTime wrapper used to stamp cache entries and convert upstream epochs.
//!
//! # Examples
//!
//! ```
//! use quote_proxy::domain::value_objects::timestamp::Timestamp;
//!
//! let fetched_at = Timestamp::from_secs(1_704_067_200).unwrap();
//! let later = fetched_at.add_secs(20);
//!
//! assert!(later.is_after(&fetched_at));
//! assert_eq!(later.elapsed_since(&fetched_at).as_secs(), 20);
//! ```

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC timestamp with millisecond resolution or better.
///
/// Wraps `chrono::DateTime<Utc>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from Unix milliseconds.
    ///
    /// Returns `None` if the value is out of range.
    #[must_use]
    pub fn from_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    /// Creates a timestamp from Unix seconds.
    ///
    /// Returns `None` if the value is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use quote_proxy::domain::value_objects::timestamp::Timestamp;
    ///
    /// let ts = Timestamp::from_secs(1_704_067_200).unwrap();
    /// assert_eq!(ts.timestamp_millis(), 1_704_067_200_000);
    /// ```
    #[must_use]
    pub fn from_secs(secs: i64) -> Option<Self> {
        Utc.timestamp_opt(secs, 0).single().map(Self)
    }

    /// Returns the Unix timestamp in milliseconds.
    #[inline]
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Returns the Unix timestamp in seconds.
    #[inline]
    #[must_use]
    pub fn timestamp_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Adds seconds to the timestamp (can be negative).
    #[must_use]
    pub fn add_secs(&self, secs: i64) -> Self {
        Self(self.0 + Duration::seconds(secs))
    }

    /// Returns true if this timestamp is after `other`.
    #[inline]
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self.0 > other.0
    }

    /// Returns how much time passed between `earlier` and `self`.
    ///
    /// Saturates to zero when `earlier` is actually later (clock skew).
    #[must_use]
    pub fn elapsed_since(&self, earlier: &Self) -> std::time::Duration {
        (self.0 - earlier.0)
            .to_std()
            .unwrap_or(std::time::Duration::ZERO)
    }

    /// Returns the calendar date at the given UTC offset.
    ///
    /// Upstream daily bars are stamped at the session open in exchange time,
    /// so the offset is needed to land on the right trading day.
    #[must_use]
    pub fn date_at_offset(&self, offset_secs: i64) -> NaiveDate {
        (self.0 + Duration::seconds(offset_secs)).date_naive()
    }

    /// Returns the calendar date in UTC.
    #[inline]
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
