//! Parsers for the auxiliary DOCX parts: relationships, styles and numbering.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error_handling::DocumentError;

/// Extracts an attribute value by qualified key, unescaping XML entities.
pub(super) fn get_attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| {
            attr.unescape_value()
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned())
        })
}

fn xml_error(part: &str, e: quick_xml::Error) -> DocumentError {
    DocumentError::Conversion(format!("error parsing {}: {}", part, e))
}

/// Parses `word/_rels/document.xml.rels` into a map of relationship ID to target.
pub(super) fn parse_relationships(xml: &str) -> Result<HashMap<String, String>, DocumentError> {
    let mut relationships = HashMap::new();
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"Relationship" => {
                if let (Some(id), Some(target)) = (get_attr(&e, b"Id"), get_attr(&e, b"Target")) {
                    relationships.insert(id, target);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error("relationships", e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(relationships)
}

/// How a paragraph style renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum StyleRole {
    /// `Title` or `Heading N`
    Heading(u8),
    /// `List Bullet*` styles
    BulletList,
    /// `List Number*` styles
    NumberedList,
}

/// Paragraph styles from `word/styles.xml`, keyed by style ID.
#[derive(Debug, Default)]
pub(super) struct Styles {
    names: HashMap<String, String>,
}

impl Styles {
    /// Resolves the rendering role of a style ID.
    ///
    /// The display name is preferred; documents without `styles.xml` still
    /// carry meaningful IDs such as `Heading2`.
    pub(super) fn role(&self, style_id: &str) -> Option<StyleRole> {
        let name = self
            .names
            .get(style_id)
            .map(String::as_str)
            .unwrap_or(style_id);
        role_from_name(name).or_else(|| role_from_name(style_id))
    }
}

fn role_from_name(name: &str) -> Option<StyleRole> {
    let compact: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    if compact == "title" {
        return Some(StyleRole::Heading(1));
    }
    if let Some(level) = compact.strip_prefix("heading") {
        return match level.parse::<u8>() {
            Ok(n @ 1..=6) => Some(StyleRole::Heading(n)),
            _ => None,
        };
    }
    if compact.starts_with("listbullet") {
        return Some(StyleRole::BulletList);
    }
    if compact.starts_with("listnumber") {
        return Some(StyleRole::NumberedList);
    }
    None
}

/// Parses `word/styles.xml`, keeping the display name of each paragraph style.
pub(super) fn parse_styles(xml: &str) -> Result<Styles, DocumentError> {
    let mut styles = Styles::default();
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut current: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:style" => {
                current = get_attr(&e, b"w:styleId");
            }
            Ok(Event::Empty(e)) if e.name().as_ref() == b"w:name" => {
                if let (Some(id), Some(name)) = (current.as_ref(), get_attr(&e, b"w:val")) {
                    styles.names.insert(id.clone(), name);
                }
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"w:style" => current = None,
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error("styles", e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(styles)
}

/// Numbering definitions from `word/numbering.xml`.
#[derive(Debug, Default)]
pub(super) struct Numbering {
    /// numId -> abstractNumId
    instances: HashMap<String, String>,
    /// (abstractNumId, level) -> numFmt
    formats: HashMap<(String, u32), String>,
}

impl Numbering {
    /// Whether a numbered paragraph belongs in an ordered list.
    ///
    /// Unknown numbering falls back to unordered.
    pub(super) fn is_ordered(&self, num_id: &str, level: u32) -> bool {
        self.instances
            .get(num_id)
            .and_then(|abstract_id| self.formats.get(&(abstract_id.clone(), level)))
            .map(|fmt| fmt != "bullet" && fmt != "none")
            .unwrap_or(false)
    }
}

/// Parses `word/numbering.xml`.
pub(super) fn parse_numbering(xml: &str) -> Result<Numbering, DocumentError> {
    let mut numbering = Numbering::default();
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut abstract_id: Option<String> = None;
    let mut level: Option<u32> = None;
    let mut num_id: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:abstractNum" => abstract_id = get_attr(&e, b"w:abstractNumId"),
                b"w:lvl" => level = get_attr(&e, b"w:ilvl").and_then(|v| v.parse().ok()),
                b"w:num" => num_id = get_attr(&e, b"w:numId"),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:numFmt" => {
                    if let (Some(id), Some(lvl), Some(fmt)) =
                        (abstract_id.as_ref(), level, get_attr(&e, b"w:val"))
                    {
                        numbering.formats.insert((id.clone(), lvl), fmt);
                    }
                }
                b"w:abstractNumId" => {
                    if let (Some(id), Some(target)) = (num_id.as_ref(), get_attr(&e, b"w:val")) {
                        numbering.instances.insert(id.clone(), target);
                    }
                }
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:abstractNum" => abstract_id = None,
                b"w:lvl" => level = None,
                b"w:num" => num_id = None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error("numbering", e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(numbering)
}
