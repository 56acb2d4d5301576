//! DOCX export download.

use reqwest::header::{HeaderMap, CONTENT_TYPE};

use super::document::DownloadedDocument;
use super::url::{export_url, extract_doc_id};
use crate::config::{Config, DOCX_MIME_TYPE};
use crate::error_handling::{categorize_status, categorize_transport_error, DocumentError};

/// Downloads the DOCX export of a Google Docs document.
///
/// The document ID is parsed from `url`, the export is requested from
/// `config.export_base_url`, and the body is stored in a fresh temporary
/// directory owned by the returned `DownloadedDocument`.
///
/// # Arguments
///
/// * `client` - Shared HTTP client (carries the timeout and User-Agent)
/// * `config` - Service configuration
/// * `url` - The Google Docs URL supplied by the caller
///
/// # Errors
///
/// - `InvalidUrl` if `url` is not a Google Docs document URL
/// - `Unauthorized` for 401/403 answers
/// - `NotFound` for 404 answers
/// - `NotPubliclyAccessible` if the answer is not a DOCX file
/// - `DownloadFailed` for other statuses, transport failures and oversized bodies
/// - `Storage` if the payload cannot be written to disk
pub async fn download_docx(
    client: &reqwest::Client,
    config: &Config,
    url: &str,
) -> Result<DownloadedDocument, DocumentError> {
    let doc_id = extract_doc_id(url)?;
    let export = export_url(&config.export_base_url, &doc_id);
    log::debug!("Requesting export of document {} from {}", doc_id, export);

    let response = client
        .get(&export)
        .send()
        .await
        .map_err(|e| categorize_transport_error(&e))?;

    let status = response.status();
    if let Some(err) = categorize_status(status) {
        log::warn!(
            "Export of document {} answered with status {}",
            doc_id,
            status
        );
        return Err(err);
    }

    if !is_docx_response(response.headers()) {
        log::warn!(
            "Export of document {} answered with content type {:?}",
            doc_id,
            response.headers().get(CONTENT_TYPE)
        );
        return Err(DocumentError::NotPubliclyAccessible);
    }

    let limit = config.max_document_bytes;
    if let Some(declared) = response.content_length() {
        if declared > limit {
            return Err(too_large(declared, limit));
        }
    }

    let bytes = read_body_limited(response, limit).await?;
    log::debug!("Downloaded {} bytes for document {}", bytes.len(), doc_id);

    DownloadedDocument::persist(&bytes, config.temp_dir.as_deref()).await
}

/// Returns true when the response declares the DOCX MIME type.
///
/// Parameters such as `; charset=...` are ignored and the comparison is
/// case-insensitive.
fn is_docx_response(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|essence| essence.trim().eq_ignore_ascii_case(DOCX_MIME_TYPE))
        .unwrap_or(false)
}

/// Reads the response body chunk by chunk, failing as soon as it grows past
/// `limit` bytes. Chunked responses carry no length up front.
async fn read_body_limited(
    mut response: reqwest::Response,
    limit: u64,
) -> Result<Vec<u8>, DocumentError> {
    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| categorize_transport_error(&e))?
    {
        body.extend_from_slice(&chunk);
        if body.len() as u64 > limit {
            return Err(too_large(body.len() as u64, limit));
        }
    }
    Ok(body)
}

fn too_large(size: u64, limit: u64) -> DocumentError {
    DocumentError::DownloadFailed(format!(
        "document is {} bytes, larger than the {} byte limit",
        size, limit
    ))
}
