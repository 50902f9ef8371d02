//! # History Period
//!
//! The lookback vocabulary accepted by the history endpoint.
//!
//! The strings follow the range tokens used by the common market data
//! vendors (`1mo`, `3mo`, `ytd`, ...). Providers that want a date window
//! instead of a token use [`HistoryPeriod::start_date`].

use crate::domain::errors::{DomainError, DomainResult};
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lookback window for daily history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HistoryPeriod {
    /// Latest session.
    OneDay,
    /// Last five sessions.
    FiveDays,
    /// One calendar month.
    #[default]
    OneMonth,
    /// Three calendar months.
    ThreeMonths,
    /// Six calendar months.
    SixMonths,
    /// One year.
    OneYear,
    /// Two years.
    TwoYears,
    /// Five years.
    FiveYears,
    /// Ten years.
    TenYears,
    /// Since January 1st of the current year.
    YearToDate,
    /// Everything the upstream has.
    Max,
}

impl HistoryPeriod {
    /// All supported periods, shortest first.
    pub const ALL: [Self; 11] = [
        Self::OneDay,
        Self::FiveDays,
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::OneYear,
        Self::TwoYears,
        Self::FiveYears,
        Self::TenYears,
        Self::YearToDate,
        Self::Max,
    ];

    /// Parses a period token, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPeriod` for tokens outside the vocabulary.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let token = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == token)
            .ok_or_else(|| DomainError::InvalidPeriod(raw.to_string()))
    }

    /// Returns the wire token for this period.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneDay => "1d",
            Self::FiveDays => "5d",
            Self::OneMonth => "1mo",
            Self::ThreeMonths => "3mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
            Self::TwoYears => "2y",
            Self::FiveYears => "5y",
            Self::TenYears => "10y",
            Self::YearToDate => "ytd",
            Self::Max => "max",
        }
    }

    /// Returns the first calendar date covered when the window ends on `today`.
    ///
    /// Day-based periods are padded to whole weeks so weekends and holidays
    /// still leave sessions in the window.
    #[must_use]
    pub fn start_date(&self, today: NaiveDate) -> NaiveDate {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN);
        let back = match self {
            Self::OneDay => today.checked_sub_days(Days::new(4)),
            Self::FiveDays => today.checked_sub_days(Days::new(7)),
            Self::OneMonth => today.checked_sub_months(Months::new(1)),
            Self::ThreeMonths => today.checked_sub_months(Months::new(3)),
            Self::SixMonths => today.checked_sub_months(Months::new(6)),
            Self::OneYear => today.checked_sub_months(Months::new(12)),
            Self::TwoYears => today.checked_sub_months(Months::new(24)),
            Self::FiveYears => today.checked_sub_months(Months::new(60)),
            Self::TenYears => today.checked_sub_months(Months::new(120)),
            Self::YearToDate => NaiveDate::from_ymd_opt(today.year(), 1, 1),
            Self::Max => Some(epoch),
        };
        back.unwrap_or(epoch)
    }

    /// Maximum number of sessions to keep, for periods defined by a
    /// session count rather than a calendar span.
    #[must_use]
    pub fn session_limit(&self) -> Option<usize> {
        match self {
            Self::OneDay => Some(1),
            Self::FiveDays => Some(5),
            _ => None,
        }
    }
}

impl fmt::Display for HistoryPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryPeriod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HistoryPeriod {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HistoryPeriod> for String {
    fn from(period: HistoryPeriod) -> Self {
        period.as_str().to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_roundtrips_every_token() {
        for period in HistoryPeriod::ALL {
            assert_eq!(HistoryPeriod::parse(period.as_str()).unwrap(), period);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(HistoryPeriod::parse("3MO").unwrap(), HistoryPeriod::ThreeMonths);
        assert_eq!(HistoryPeriod::parse(" ytd ").unwrap(), HistoryPeriod::YearToDate);
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = HistoryPeriod::parse("fortnight").unwrap_err();
        assert!(matches!(err, DomainError::InvalidPeriod(ref p) if p == "fortnight"));
    }

    #[test]
    fn default_is_one_month() {
        assert_eq!(HistoryPeriod::default().as_str(), "1mo");
    }

    #[test]
    fn start_date_calendar_spans() {
        let today = date(2024, 5, 15);
        assert_eq!(HistoryPeriod::OneMonth.start_date(today), date(2024, 4, 15));
        assert_eq!(HistoryPeriod::ThreeMonths.start_date(today), date(2024, 2, 15));
        assert_eq!(HistoryPeriod::OneYear.start_date(today), date(2023, 5, 15));
        assert_eq!(HistoryPeriod::YearToDate.start_date(today), date(2024, 1, 1));
        assert_eq!(HistoryPeriod::Max.start_date(today), date(1970, 1, 1));
    }

    #[test]
    fn start_date_pads_day_periods() {
        let monday = date(2024, 5, 13);
        assert_eq!(HistoryPeriod::OneDay.start_date(monday), date(2024, 5, 9));
        assert_eq!(HistoryPeriod::FiveDays.start_date(monday), date(2024, 5, 6));
    }

    #[test]
    fn session_limits() {
        assert_eq!(HistoryPeriod::OneDay.session_limit(), Some(1));
        assert_eq!(HistoryPeriod::FiveDays.session_limit(), Some(5));
        assert_eq!(HistoryPeriod::OneMonth.session_limit(), None);
    }
}
