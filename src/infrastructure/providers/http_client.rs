//! # HTTP Client Utilities
//!
//! Shared HTTP client for provider adapters.
//!
//! Wraps `reqwest` with a fixed per-request timeout and maps every transport
//! or status failure onto [`ProviderError`].
//!
//! # Examples
//!
//! ```ignore
//! use quote_proxy::infrastructure::providers::http_client::HttpClient;
//!
//! let client = HttpClient::new(5000)?;
//! let quote: FinnhubQuote = client
//!     .get_with_params("https://finnhub.io/api/v1/quote", &[("symbol", "AAPL")])
//!     .await?;
//! ```

use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use reqwest::header::HeaderMap;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Longest slice of an error body kept in error messages.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// HTTP client wrapper for provider adapters.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client.
    client: Client,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified timeout.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Configuration` if the client cannot be created.
    pub fn new(timeout_ms: u64) -> ProviderResult<Self> {
        Self::with_headers(timeout_ms, HeaderMap::new())
    }

    /// Creates a new HTTP client that sends `default_headers` on every request.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Configuration` if the client cannot be created.
    pub fn with_headers(timeout_ms: u64, default_headers: HeaderMap) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .default_headers(default_headers)
            .build()
            .map_err(|e| {
                ProviderError::configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, timeout_ms })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Makes a GET request with query parameters and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Timeout` or `ProviderError::Connection` if the
    /// request fails, `ProviderError::Status` on a non-success status, and
    /// `ProviderError::Protocol` if the response cannot be parsed.
    pub async fn get_with_params<T: DeserializeOwned, P: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        params: &P,
    ) -> ProviderResult<T> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Handles the HTTP response, checking status and deserializing JSON.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> ProviderResult<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ProviderError::protocol(format!("Failed to parse response: {}", e)))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            Err(self.map_status_error(status, &error_body))
        }
    }

    /// Maps a reqwest error to a ProviderError.
    fn map_reqwest_error(&self, error: reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            ProviderError::timeout(format!("Request timed out after {}ms", self.timeout_ms))
        } else if error.is_connect() {
            ProviderError::connection(format!("Connection failed: {}", error))
        } else {
            ProviderError::connection(format!("HTTP request failed: {}", error))
        }
    }

    /// Maps an HTTP status code to a ProviderError.
    fn map_status_error(&self, status: StatusCode, body: &str) -> ProviderError {
        let body = truncate(body);
        let message = match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                format!("Authentication failed: {}", body)
            }
            StatusCode::NOT_FOUND => format!("Resource not found: {}", body),
            StatusCode::TOO_MANY_REQUESTS => "Rate limit exceeded".to_string(),
            _ => format!("HTTP error: {}", body),
        };
        ProviderError::status(status.as_u16(), message)
    }
}

fn truncate(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((cut, _)) => format!("{}...", trimmed.get(..cut).unwrap_or(trimmed)),
        None => trimmed.to_string(),
    }
}
