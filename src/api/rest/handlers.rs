//! # REST Handlers
//!
//! Request handlers, request/response bodies and the error-to-status mapping.

use crate::application::{ApplicationError, QuoteService};
use crate::domain::entities::{PriceHistory, QuoteRecord};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Quote lookups.
    pub quote_service: QuoteService,
}

impl AppState {
    /// Wraps a quote service.
    #[must_use]
    pub fn new(quote_service: QuoteService) -> Self {
        Self { quote_service }
    }
}

/// Error body: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human readable message.
    pub error: String,
}

impl ErrorResponse {
    /// Creates an error body.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Health body: `{"status": "healthy"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"` while the process serves requests.
    pub status: String,
}

/// Batch request body.
#[derive(Debug, Clone, Deserialize)]
pub struct QuotesRequest {
    /// Symbols to look up; only the first batch-limit entries are used.
    pub symbols: Vec<String>,
}

/// History query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    /// Period token such as `1mo`; the configured default when absent.
    pub period: Option<String>,
}

/// Errors returned by handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 400 with a message.
    BadRequest(String),
    /// 404 with a message.
    NotFound(String),
    /// 500 with a message.
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::BadRequest(m) | Self::NotFound(m) | Self::Internal(m) => m,
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        if err.is_validation() {
            Self::BadRequest(err.to_string())
        } else if err.is_not_found() {
            Self::NotFound(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorResponse::new(self.message()))).into_response()
    }
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// `GET /api/quote/{symbol}`
///
/// # Errors
///
/// 404 `{"error": "Not found"}` when no quote can be obtained.
pub async fn get_quote(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> Result<Json<QuoteRecord>, ApiError> {
    state
        .quote_service
        .quote(&symbol)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Not found".to_string()))
}

/// `POST /api/quotes`
///
/// Always 200 for a well-formed body, possibly with an empty array.
///
/// # Errors
///
/// 400 when the body is not JSON or lacks a `symbols` list of strings.
pub async fn get_quotes(
    State(state): State<Arc<AppState>>,
    body: Result<Json<QuotesRequest>, JsonRejection>,
) -> Result<Json<Vec<QuoteRecord>>, ApiError> {
    let Json(request) = body.inspect_err(|e| debug!(error = %e, "rejected batch body"))?;
    Ok(Json(state.quote_service.quotes(request.symbols.as_slice()).await))
}

/// `GET /api/popular`
pub async fn get_popular(State(state): State<Arc<AppState>>) -> Json<Vec<QuoteRecord>> {
    Json(state.quote_service.popular().await)
}

/// `GET /api/history/{symbol}?period=...`
///
/// # Errors
///
/// - 400 for a malformed symbol or unknown period
/// - 404 `{"error": "No historical data"}` when the series is empty
/// - 500 with the upstream message for any other failure
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<PriceHistory>, ApiError> {
    state
        .quote_service
        .history(&symbol, query.period.as_deref())
        .await
        .map(Json)
        .map_err(|e| {
            if e.is_not_found() {
                ApiError::NotFound("No historical data".to_string())
            } else {
                ApiError::from(e)
            }
        })
}
