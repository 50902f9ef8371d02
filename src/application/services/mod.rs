//! # Application Services
//!
//! - [`QuoteService`]: cached quote lookups, batches and history

pub mod quote_service;

pub use quote_service::{QuoteService, QuoteServiceConfig};
