//! Health and fallback handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::super::types::{ErrorResponse, HealthResponse};

/// Liveness endpoint
pub async fn health_handler() -> Response {
    (StatusCode::OK, Json(HealthResponse { status: "ok" })).into_response()
}

/// Answers any unknown route
pub async fn not_found_handler() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
        .into_response()
}
