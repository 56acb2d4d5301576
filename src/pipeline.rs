//! Request orchestration: download, convert, extract.

use serde::Serialize;

use crate::config::{Config, MAX_HTML_PREVIEW_CHARS};
use crate::convert::convert_docx_to_html;
use crate::error_handling::DocumentError;
use crate::extract::{extract_structured_data, StructuredData};
use crate::fetch::download_docx;
use crate::utils::preview;

/// Result of processing one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOutcome {
    /// HTML rendering of the whole document
    pub raw_html: String,
    /// Extracted keyword values
    pub structured_data: StructuredData,
}

/// Downloads a Google Docs document, converts it to HTML and extracts the
/// requested keywords.
///
/// The temporary directory holding the download is removed before this
/// function returns, whatever the outcome. Removal failures are logged only.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `config` - Service configuration
/// * `url` - Google Docs URL of the document
/// * `keywords` - Keywords to extract; may be empty
///
/// # Errors
///
/// Propagates the `DocumentError` of the failing stage.
pub async fn parse_document(
    client: &reqwest::Client,
    config: &Config,
    url: &str,
    keywords: &[String],
) -> Result<ParseOutcome, DocumentError> {
    let document = download_docx(client, config, url).await?;

    let path = document.path().to_path_buf();
    let converted = tokio::task::spawn_blocking(move || convert_docx_to_html(&path))
        .await
        .map_err(|e| DocumentError::Internal(format!("conversion task failed: {}", e)));
    document.cleanup();

    let raw_html = converted??;
    log::debug!(
        "HTML preview: {}",
        preview(&raw_html, MAX_HTML_PREVIEW_CHARS)
    );

    let structured_data = extract_structured_data(&raw_html, keywords);

    Ok(ParseOutcome {
        raw_html,
        structured_data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serializes_camel_case() {
        let mut structured_data = StructuredData::new();
        structured_data.insert("Customer Name".to_string(), "John Doe".to_string());
        let outcome = ParseOutcome {
            raw_html: "<p>Customer Name: John Doe</p>".to_string(),
            structured_data,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["rawHtml"], "<p>Customer Name: John Doe</p>");
        assert_eq!(json["structuredData"]["Customer Name"], "John Doe");
    }

    #[tokio::test]
    async fn test_invalid_url_fails_before_download() {
        let client = reqwest::Client::new();
        let config = Config::default();
        let result = parse_document(&client, &config, "https://example.com/x", &[]).await;
        assert!(matches!(result, Err(DocumentError::InvalidUrl)));
    }
}
