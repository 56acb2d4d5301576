//! Document URL handling.

use regex::Regex;
use std::sync::LazyLock;

use crate::error_handling::DocumentError;
use crate::utils::compile_regex_unsafe;

const DOC_URL_PATTERN: &str = r"^https?://docs\.google\.com/document/d/([A-Za-z0-9_-]+)(?:[/?#]|$)";

static DOC_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(DOC_URL_PATTERN, "DOC_URL_RE"));

/// Extracts the document ID from a Google Docs URL.
///
/// Accepts `http(s)://docs.google.com/document/d/<ID>` optionally followed by a
/// path, query or fragment (`/edit`, `/edit?usp=sharing`, ...). Surrounding
/// whitespace is ignored.
///
/// # Errors
///
/// Returns `DocumentError::InvalidUrl` for empty input or any URL that does
/// not follow that layout.
pub fn extract_doc_id(url: &str) -> Result<String, DocumentError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(DocumentError::InvalidUrl);
    }

    DOC_URL_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
        .ok_or(DocumentError::InvalidUrl)
}

/// Builds the DOCX export URL for a document ID.
///
/// `base` is the scheme and host of the export service, normally
/// `https://docs.google.com`; a trailing slash is tolerated.
pub fn export_url(base: &str, doc_id: &str) -> String {
    format!(
        "{}/document/d/{}/export?format=docx",
        base.trim_end_matches('/'),
        doc_id
    )
}
