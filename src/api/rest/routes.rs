//! # REST Routes
//!
//! Route table and HTTP middleware.

use super::handlers::{self, AppState};
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the route table.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/quote/{symbol}", get(handlers::get_quote))
        .route("/api/quotes", post(handlers::get_quotes))
        .route("/api/popular", get(handlers::get_popular))
        .route("/api/history/{symbol}", get(handlers::get_history))
        .with_state(state)
}

/// Adds request tracing and, when enabled, a permissive CORS policy.
#[must_use]
pub fn apply_middleware(router: Router, cors_permissive: bool) -> Router {
    let router = router.layer(TraceLayer::new_for_http());
    if cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
