//! DOCX to HTML conversion.
//!
//! Reads the WordprocessingML parts of a DOCX archive and renders an HTML
//! fragment:
//! - Paragraphs become `<p>`, `Title`/`Heading N` styles become `<h1>`..`<h6>`
//! - Numbered and bulleted paragraphs are grouped into `<ol>`/`<ul>` lists
//! - Tables become `<table>` with `<th>` for repeated header rows
//! - Bold, italic, hyperlinks and line breaks are preserved
//!
//! Parsing is done with `zip` and `quick-xml`; no external converter is needed.

mod body;
mod parts;
mod render;

use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use zip::result::ZipError;
use zip::ZipArchive;

use crate::error_handling::DocumentError;
use body::walk_body;
use parts::{parse_numbering, parse_relationships, parse_styles, Numbering, Styles};
use render::{render_blocks, RenderContext};

const DOCUMENT_PART: &str = "word/document.xml";
const RELATIONSHIPS_PART: &str = "word/_rels/document.xml.rels";
const STYLES_PART: &str = "word/styles.xml";
const NUMBERING_PART: &str = "word/numbering.xml";

/// Converts the DOCX file at `path` into an HTML fragment.
///
/// # Errors
///
/// - `InvalidPath` if `path` is empty
/// - `FileNotFound` if nothing exists at `path`
/// - `Conversion` if the archive or its XML parts cannot be read
pub fn convert_docx_to_html(path: &Path) -> Result<String, DocumentError> {
    if path.as_os_str().is_empty() {
        return Err(DocumentError::InvalidPath);
    }
    if !path.exists() {
        return Err(DocumentError::FileNotFound(path.to_path_buf()));
    }

    let file = File::open(path)
        .map_err(|e| DocumentError::Conversion(format!("cannot open {}: {}", path.display(), e)))?;
    let html = convert_archive(file)?;
    log::debug!(
        "Converted {} into {} bytes of HTML",
        path.display(),
        html.len()
    );
    Ok(html)
}

/// Converts an in-memory DOCX payload into an HTML fragment.
pub fn convert_docx_bytes(bytes: &[u8]) -> Result<String, DocumentError> {
    convert_archive(Cursor::new(bytes))
}

fn convert_archive<R: Read + Seek>(reader: R) -> Result<String, DocumentError> {
    let mut archive = ZipArchive::new(reader)
        .map_err(|e| DocumentError::Conversion(format!("not a DOCX archive: {}", e)))?;

    let document_xml = read_part(&mut archive, DOCUMENT_PART)?
        .ok_or_else(|| DocumentError::Conversion(format!("missing {}", DOCUMENT_PART)))?;

    let relationships = match read_part(&mut archive, RELATIONSHIPS_PART)? {
        Some(xml) => parse_relationships(&xml)?,
        None => HashMap::new(),
    };
    let styles = match read_part(&mut archive, STYLES_PART)? {
        Some(xml) => parse_styles(&xml)?,
        None => Styles::default(),
    };
    let numbering = match read_part(&mut archive, NUMBERING_PART)? {
        Some(xml) => parse_numbering(&xml)?,
        None => Numbering::default(),
    };

    let blocks = walk_body(&document_xml, &relationships)?;

    let ctx = RenderContext {
        styles: &styles,
        numbering: &numbering,
    };
    let mut html = String::new();
    render_blocks(&blocks, &ctx, &mut html);
    Ok(html)
}

/// Reads a part of the archive as UTF-8, `None` if it is absent.
fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>, DocumentError> {
    let mut part = match archive.by_name(name) {
        Ok(part) => part,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => {
            return Err(DocumentError::Conversion(format!(
                "cannot read {}: {}",
                name, e
            )))
        }
    };

    let mut content = String::new();
    part.read_to_string(&mut content)
        .map_err(|e| DocumentError::Conversion(format!("cannot read {}: {}", name, e)))?;
    Ok(Some(content))
}
