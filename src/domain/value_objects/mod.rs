//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! - [`Symbol`]: upper-cased ticker, the cache key everywhere
//! - [`HistoryPeriod`]: lookback vocabulary for daily history
//! - [`Timestamp`]: UTC instant used for cache freshness
//! - [`arithmetic`]: checked decimal math and wire rounding

pub mod arithmetic;
pub mod period;
pub mod symbol;
pub mod timestamp;

pub use arithmetic::{ArithmeticError, ArithmeticResult, CheckedArithmetic, round_quote};
pub use period::HistoryPeriod;
pub use symbol::Symbol;
pub use timestamp::Timestamp;
