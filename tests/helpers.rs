// Shared test helpers for building DOCX fixtures and pointing the service at a
// mock export server.

use std::io::{Cursor, Write};
use std::sync::Arc;

use gdoc_fields::config::DOCX_MIME_TYPE;
use gdoc_fields::{init_client, AppState, Config};
use wiremock::ResponseTemplate;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Document ID used by the fixtures.
#[allow(dead_code)]
pub const DOC_ID: &str = "1AbCdEf_123-xyz";

/// Google Docs URL for `DOC_ID`.
#[allow(dead_code)]
pub fn doc_url() -> String {
    format!("https://docs.google.com/document/d/{}/edit?usp=sharing", DOC_ID)
}

/// Path the export of `DOC_ID` is requested on.
#[allow(dead_code)]
pub fn export_path() -> String {
    format!("/document/d/{}/export", DOC_ID)
}

/// Builds a minimal DOCX archive whose body is `body_xml`.
#[allow(dead_code)]
pub fn build_docx(body_xml: &str) -> Vec<u8> {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:body>{}</w:body></w:document>"#,
        body_xml
    );
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", SimpleFileOptions::default())
        .expect("Failed to start document.xml");
    writer
        .write_all(document.as_bytes())
        .expect("Failed to write document.xml");
    writer.finish().expect("Failed to finish DOCX").into_inner()
}

/// A paragraph with the given style (if any) and text.
#[allow(dead_code)]
pub fn paragraph(style: Option<&str>, text: &str) -> String {
    let props = style
        .map(|s| format!(r#"<w:pPr><w:pStyle w:val="{}"/></w:pPr>"#, s))
        .unwrap_or_default();
    format!(
        r#"<w:p>{}<w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        props, text
    )
}

/// A sample document exercising both extraction passes.
#[allow(dead_code)]
pub fn sample_docx() -> Vec<u8> {
    let body = [
        paragraph(None, "Customer Name: John Doe"),
        paragraph(Some("Heading2"), "Product title"),
        paragraph(None, "Widget X"),
    ]
    .concat();
    build_docx(&body)
}

/// A 200 response carrying `bytes` as a DOCX payload.
#[allow(dead_code)]
pub fn docx_response(bytes: Vec<u8>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(bytes, DOCX_MIME_TYPE)
}

/// Config pointing the export download at `base_url`.
#[allow(dead_code)]
pub fn test_config(base_url: &str) -> Config {
    Config {
        export_base_url: base_url.to_string(),
        timeout_seconds: 5,
        user_agent: "gdoc_fields_test/1.0".to_string(),
        ..Default::default()
    }
}

/// Server state backed by `config`.
#[allow(dead_code)]
pub fn test_state(config: Config) -> AppState {
    let client = init_client(&config).expect("Failed to build HTTP client");
    AppState {
        client,
        config: Arc::new(config),
    }
}
