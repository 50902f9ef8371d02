//! # Domain Entities
//!
//! - [`QuoteRecord`]: normalized quote, the API's output contract
//! - [`HistoryPoint`] / [`PriceHistory`]: daily OHLCV series

pub mod history;
pub mod quote;

pub use history::{HistoryPoint, PriceHistory};
pub use quote::{QuoteRecord, QuoteRecordBuilder};
