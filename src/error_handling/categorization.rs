//! Error categorization for the export download.
//!
//! This module maps upstream HTTP statuses and `reqwest` transport failures onto
//! `DocumentError` variants.

use reqwest::StatusCode;

use super::types::DocumentError;

/// Categorizes the status of an export response.
///
/// Statuses in `[200, 400)` are left to the caller, which inspects the
/// content type instead; everything else becomes an error.
///
/// # Arguments
///
/// * `status` - The HTTP status returned by the export endpoint
///
/// # Returns
///
/// `None` for statuses that should be inspected further, or the matching error.
pub fn categorize_status(status: StatusCode) -> Option<DocumentError> {
    match status.as_u16() {
        200..=399 => None,
        401 | 403 => Some(DocumentError::Unauthorized),
        404 => Some(DocumentError::NotFound),
        code => Some(DocumentError::DownloadFailed(format!(
            "Request failed with status code {}",
            code
        ))),
    }
}

/// Categorizes a `reqwest::Error` raised while sending the request or reading
/// the body.
///
/// A status carried by the error goes through `categorize_status` so a 404
/// surfaces as `NotFound` no matter where it was detected. Everything else is a
/// `DownloadFailed` with a short label and the original message.
pub fn categorize_transport_error(error: &reqwest::Error) -> DocumentError {
    if let Some(err) = error.status().and_then(categorize_status) {
        return err;
    }

    let label = if error.is_timeout() {
        "request timed out"
    } else if error.is_connect() {
        "connection failed"
    } else if error.is_redirect() {
        "too many redirects"
    } else if error.is_body() || error.is_decode() {
        "failed to read response body"
    } else if error.is_builder() {
        "invalid request"
    } else {
        "request error"
    };

    DocumentError::DownloadFailed(format!("{}: {}", label, error))
}
