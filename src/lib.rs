//! # Quote Proxy
//!
//! A caching HTTP proxy in front of an upstream stock market data vendor.
//!
//! Upstream responses are normalized into a stable [`QuoteRecord`] shape with
//! two-decimal figures, cached in memory for a short TTL, and served through a
//! small JSON API.
//!
//! # Layers
//!
//! - [`domain`]: value objects (`Symbol`, `HistoryPeriod`, `Timestamp`) and
//!   the quote and history entities
//! - [`application`]: the [`QuoteService`] cache-aside orchestration
//! - [`infrastructure`]: vendor adapters behind the `QuoteProvider` trait and
//!   the quote cache
//! - [`api`]: axum routes and handlers
//! - [`config`] and [`logging`]: startup plumbing
//!
//! [`QuoteRecord`]: domain::entities::QuoteRecord
//! [`QuoteService`]: application::QuoteService

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
