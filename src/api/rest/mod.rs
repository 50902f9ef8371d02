//! # REST API
//!
//! JSON endpoints served with axum.
//!
//! # Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /api/quote/{symbol}` - Single quote, 404 when unavailable
//! - `POST /api/quotes` - Batch quotes for `{"symbols": [...]}`
//! - `GET /api/popular` - Quotes for the configured popular symbols
//! - `GET /api/history/{symbol}?period=1mo` - Daily OHLCV bars
//!
//! # Usage
//!
//! ```ignore
//! use quote_proxy::api::rest::{create_router, AppState};
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState::new(quote_service));
//! let router = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5001").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    ApiError, AppState, ErrorResponse, HealthResponse, HistoryQuery, QuotesRequest,
};
pub use routes::{apply_middleware, create_router};
