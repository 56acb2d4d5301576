//! Document parsing handler.

use std::time::Instant;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::super::types::{ApiError, AppState, ParseRequest};
use crate::error_handling::ErrorKind;
use crate::pipeline::parse_document;

/// `POST /parse-doc`: validates the body, runs the pipeline and maps its
/// outcome to a response.
///
/// The body is taken as raw bytes so that malformed JSON and wrongly typed
/// fields all produce the same `{"error": ...}` shape with status 400.
pub async fn parse_doc_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match ParseRequest::from_json(&body) {
        Ok(request) => request,
        Err(e) => {
            log::debug!("Rejected parse request: {}", e);
            return ApiError(e).into_response();
        }
    };

    let start = Instant::now();
    log::info!(
        "Parsing {} with {} keyword{}",
        request.url,
        request.keywords.len(),
        if request.keywords.len() == 1 { "" } else { "s" }
    );

    match parse_document(&state.client, &state.config, &request.url, &request.keywords).await {
        Ok(outcome) => {
            log::info!(
                "Parsed {} in {:.2}s: {} bytes of HTML, {} field{} extracted",
                request.url,
                start.elapsed().as_secs_f64(),
                outcome.raw_html.len(),
                outcome.structured_data.len(),
                if outcome.structured_data.len() == 1 { "" } else { "s" }
            );
            (StatusCode::OK, Json(outcome)).into_response()
        }
        Err(e) => {
            match e.kind() {
                ErrorKind::Internal => log::error!("Failed to parse {}: {}", request.url, e),
                ErrorKind::InvalidInput | ErrorKind::Unauthorized | ErrorKind::NotFound => {
                    log::warn!("Failed to parse {}: {}", request.url, e)
                }
            }
            ApiError(e).into_response()
        }
    }
}
