// Convert module tests.

use super::*;
use std::io::Write;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn build_docx(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in parts {
        writer
            .start_file(name.to_string(), SimpleFileOptions::default())
            .expect("start zip entry");
        writer.write_all(content.as_bytes()).expect("write zip entry");
    }
    writer.finish().expect("finish zip").into_inner()
}

fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:body>{}</w:body></w:document>"#,
        body
    )
}

#[test]
fn test_convert_paragraphs_and_headings() {
    let body = r#"<w:p><w:pPr><w:pStyle w:val="Heading2"/></w:pPr><w:r><w:t>Product title</w:t></w:r></w:p><w:p><w:r><w:t>Widget X</w:t></w:r></w:p>"#;
    let docx = build_docx(&[(DOCUMENT_PART, &document_xml(body))]);
    let html = convert_docx_bytes(&docx).unwrap();
    assert_eq!(html, "<h2>Product title</h2><p>Widget X</p>");
}

#[test]
fn test_convert_uses_styles_and_numbering_parts() {
    let styles = r#"<w:styles xmlns:w="w"><w:style w:type="paragraph" w:styleId="a1"><w:name w:val="heading 1"/></w:style></w:styles>"#;
    let numbering = r#"<w:numbering xmlns:w="w"><w:abstractNum w:abstractNumId="3"><w:lvl w:ilvl="0"><w:numFmt w:val="decimal"/></w:lvl></w:abstractNum><w:num w:numId="7"><w:abstractNumId w:val="3"/></w:num></w:numbering>"#;
    let body = r#"<w:p><w:pPr><w:pStyle w:val="a1"/></w:pPr><w:r><w:t>Steps</w:t></w:r></w:p><w:p><w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="7"/></w:numPr></w:pPr><w:r><w:t>First</w:t></w:r></w:p><w:p><w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="7"/></w:numPr></w:pPr><w:r><w:t>Second</w:t></w:r></w:p>"#;
    let docx = build_docx(&[
        (DOCUMENT_PART, &document_xml(body)),
        (STYLES_PART, styles),
        (NUMBERING_PART, numbering),
    ]);
    let html = convert_docx_bytes(&docx).unwrap();
    assert_eq!(html, "<h1>Steps</h1><ol><li>First</li><li>Second</li></ol>");
}

#[test]
fn test_convert_escapes_text() {
    let body = r#"<w:p><w:r><w:t>Price &lt; 5 &amp; "cheap"</w:t></w:r></w:p>"#;
    let docx = build_docx(&[(DOCUMENT_PART, &document_xml(body))]);
    let html = convert_docx_bytes(&docx).unwrap();
    assert_eq!(html, "<p>Price &lt; 5 &amp; &quot;cheap&quot;</p>");
}

#[test]
fn test_convert_rejects_non_zip() {
    let result = convert_docx_bytes(b"<html>sign in</html>");
    assert!(matches!(result, Err(DocumentError::Conversion(_))));
}

#[test]
fn test_convert_requires_document_part() {
    let docx = build_docx(&[("word/styles.xml", "<w:styles/>")]);
    let err = convert_docx_bytes(&docx).unwrap_err();
    assert!(err.to_string().contains("missing word/document.xml"));
}

#[test]
fn test_convert_empty_path() {
    let result = convert_docx_to_html(Path::new(""));
    assert!(matches!(result, Err(DocumentError::InvalidPath)));
}

#[test]
fn test_convert_missing_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("absent.docx");
    let result = convert_docx_to_html(&path);
    assert!(matches!(result, Err(DocumentError::FileNotFound(p)) if p == path));
}

#[test]
fn test_convert_file_on_disk() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("doc.docx");
    let body = r#"<w:p><w:r><w:t>Customer Name: John Doe</w:t></w:r></w:p>"#;
    std::fs::write(&path, build_docx(&[(DOCUMENT_PART, &document_xml(body))])).unwrap();
    let html = convert_docx_to_html(&path).unwrap();
    assert_eq!(html, "<p>Customer Name: John Doe</p>");
}

#[test]
fn test_convert_text_box_alternate_content_once() {
    let body = r#"<w:p><w:r><w:t>Intro</w:t></w:r><w:r><mc:AlternateContent><mc:Choice Requires="wps"><w:drawing><w:txbxContent><w:p><w:r><w:t>Order ID: 42</w:t></w:r></w:p></w:txbxContent></w:drawing></mc:Choice><mc:Fallback><w:pict><w:txbxContent><w:p><w:r><w:t>Order ID: 42</w:t></w:r></w:p></w:txbxContent></w:pict></mc:Fallback></mc:AlternateContent></w:r></w:p>"#;
    let docx = build_docx(&[(DOCUMENT_PART, &document_xml(body))]);
    let html = convert_docx_bytes(&docx).unwrap();
    assert_eq!(html, "<p>Order ID: 42</p><p>Intro</p>");
}
