//! # Caching
//!
//! In-process caches shared across request handlers.

pub mod quote_cache;

pub use quote_cache::QuoteCache;
