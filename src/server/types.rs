//! Server state, request validation and response types.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::error_handling::{DocumentError, ErrorKind};

/// Shared state for all handlers. Cloned per request; both fields are cheap to
/// clone and immutable.
#[derive(Clone)]
pub struct AppState {
    /// HTTP client used for export downloads
    pub client: reqwest::Client,
    /// Service configuration
    pub config: Arc<Config>,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"`
    pub status: &'static str,
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
}

/// A validated `POST /parse-doc` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRequest {
    /// Google Docs URL to fetch
    pub url: String,
    /// Keywords to extract, in caller order
    pub keywords: Vec<String>,
}

impl ParseRequest {
    /// Validates a raw JSON body.
    ///
    /// `url` must be a non-empty string. `keywords` may be absent or null;
    /// otherwise it must be an array, and its non-string entries are dropped.
    pub fn from_json(body: &[u8]) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_slice(body).map_err(|e| {
            DocumentError::InvalidRequest(format!("Request body must be valid JSON: {}", e))
        })?;

        let url = match value.get("url") {
            Some(Value::String(url)) if !url.is_empty() => url.clone(),
            _ => {
                return Err(DocumentError::InvalidRequest(
                    "URL is required and must be a string".to_string(),
                ))
            }
        };

        let keywords = match value.get("keywords") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            Some(_) => {
                return Err(DocumentError::InvalidRequest(
                    "Keywords must be an array".to_string(),
                ))
            }
        };

        Ok(Self { url, keywords })
    }
}

/// Maps an error classification onto an HTTP status.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthorized => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// A `DocumentError` on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub DocumentError);

impl From<DocumentError> for ApiError {
    fn from(err: DocumentError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.kind());
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
