//! # Infrastructure Layer
//!
//! Adapters to the outside world: upstream market data vendors and the
//! in-process quote cache.

pub mod cache;
pub mod providers;
