//! Walker for `word/document.xml`.
//!
//! Turns the WordprocessingML event stream into a small block model: paragraphs
//! (with style, numbering and formatted runs) and tables whose cells hold
//! blocks of their own.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::parts::get_attr;
use crate::error_handling::DocumentError;

/// One piece of paragraph content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Inline {
    Text {
        text: String,
        bold: bool,
        italic: bool,
        href: Option<String>,
    },
    Break,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(super) struct Paragraph {
    pub style_id: Option<String>,
    /// `(numId, ilvl)` when the paragraph is part of a numbered/bulleted list
    pub numbering: Option<(String, u32)>,
    pub inlines: Vec<Inline>,
}

impl Paragraph {
    /// True when the paragraph carries no visible text.
    pub fn is_empty(&self) -> bool {
        !self.inlines.iter().any(|inline| match inline {
            Inline::Text { text, .. } => !text.trim().is_empty(),
            Inline::Break => false,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct TableRow {
    pub is_header: bool,
    pub cells: Vec<Vec<Block>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Block {
    Paragraph(Paragraph),
    Table(Vec<TableRow>),
}

#[derive(Debug, Default)]
struct RunFormat {
    bold: bool,
    italic: bool,
}

#[derive(Debug, Default)]
struct TableBuilder {
    rows: Vec<TableRow>,
    current_row: Option<TableRow>,
}

/// Mutable state while walking the body.
struct BodyWalker<'a> {
    relationships: &'a HashMap<String, String>,
    /// Block sinks: the body at the bottom, one per open table cell above it
    sinks: Vec<Vec<Block>>,
    tables: Vec<TableBuilder>,
    paragraph: Option<Paragraph>,
    /// Outer paragraphs interrupted by a text box paragraph
    suspended: Vec<Paragraph>,
    run: RunFormat,
    hyperlink: Option<String>,
    in_paragraph_props: bool,
    in_run_props: bool,
    in_text: bool,
    /// Depth of skipped subtrees: tracked deletions (`w:del`) and the
    /// fallback copy of alternate content (`mc:Fallback`)
    skip_depth: usize,
}

impl<'a> BodyWalker<'a> {
    fn new(relationships: &'a HashMap<String, String>) -> Self {
        Self {
            relationships,
            sinks: vec![Vec::new()],
            tables: Vec::new(),
            paragraph: None,
            suspended: Vec::new(),
            run: RunFormat::default(),
            hyperlink: None,
            in_paragraph_props: false,
            in_run_props: false,
            in_text: false,
            skip_depth: 0,
        }
    }

    fn push_block(&mut self, block: Block) {
        if let Some(sink) = self.sinks.last_mut() {
            sink.push(block);
        }
    }

    fn push_text(&mut self, text: &str) {
        if self.skip_depth > 0 {
            return;
        }
        let (bold, italic, href) = (self.run.bold, self.run.italic, self.hyperlink.clone());
        if let Some(paragraph) = self.paragraph.as_mut() {
            // Merge with the previous run when formatting matches
            if let Some(Inline::Text {
                text: prev,
                bold: b,
                italic: i,
                href: h,
            }) = paragraph.inlines.last_mut()
            {
                if *b == bold && *i == italic && *h == href {
                    prev.push_str(text);
                    return;
                }
            }
            paragraph.inlines.push(Inline::Text {
                text: text.to_string(),
                bold,
                italic,
                href,
            });
        }
    }

    fn push_break(&mut self) {
        if self.skip_depth > 0 {
            return;
        }
        if let Some(paragraph) = self.paragraph.as_mut() {
            paragraph.inlines.push(Inline::Break);
        }
    }

    fn hyperlink_target(&self, e: &BytesStart) -> Option<String> {
        if let Some(rel_id) = get_attr(e, b"r:id") {
            return self.relationships.get(&rel_id).cloned();
        }
        get_attr(e, b"w:anchor").map(|anchor| format!("#{}", anchor))
    }

    /// Property elements appear both as `<w:b/>` and `<w:b>...</w:b>`.
    fn handle_property(&mut self, e: &BytesStart) {
        if self.skip_depth > 0 {
            return;
        }
        match e.name().as_ref() {
            b"w:pStyle" if self.in_paragraph_props => {
                if let Some(paragraph) = self.paragraph.as_mut() {
                    paragraph.style_id = get_attr(e, b"w:val");
                }
            }
            b"w:numId" if self.in_paragraph_props => {
                if let (Some(paragraph), Some(num_id)) =
                    (self.paragraph.as_mut(), get_attr(e, b"w:val"))
                {
                    // numId 0 explicitly removes numbering
                    if num_id == "0" {
                        paragraph.numbering = None;
                    } else {
                        let level = paragraph.numbering.as_ref().map_or(0, |(_, l)| *l);
                        paragraph.numbering = Some((num_id, level));
                    }
                }
            }
            b"w:ilvl" if self.in_paragraph_props => {
                let level = get_attr(e, b"w:val")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(0);
                if let Some(paragraph) = self.paragraph.as_mut() {
                    match paragraph.numbering.as_mut() {
                        Some((_, l)) => *l = level,
                        None => paragraph.numbering = Some((String::new(), level)),
                    }
                }
            }
            b"w:b" if self.in_run_props && !self.in_paragraph_props => {
                self.run.bold = !is_val_off(e);
            }
            b"w:i" if self.in_run_props && !self.in_paragraph_props => {
                self.run.italic = !is_val_off(e);
            }
            b"w:tblHeader" => {
                if let Some(row) = self.tables.last_mut().and_then(|t| t.current_row.as_mut()) {
                    row.is_header = !is_val_off(e);
                }
            }
            b"w:tab" if !self.in_paragraph_props => self.push_text(" "),
            b"w:br" | b"w:cr" if !self.in_paragraph_props => self.push_break(),
            _ => {}
        }
    }

    fn handle_start(&mut self, e: &BytesStart) {
        if is_skipped_subtree(e.name().as_ref()) {
            self.skip_depth += 1;
            return;
        }
        if self.skip_depth > 0 {
            return;
        }
        match e.name().as_ref() {
            b"w:tbl" => self.tables.push(TableBuilder::default()),
            b"w:tr" => {
                if let Some(table) = self.tables.last_mut() {
                    table.current_row = Some(TableRow {
                        is_header: false,
                        cells: Vec::new(),
                    });
                }
            }
            b"w:tc" => self.sinks.push(Vec::new()),
            b"w:p" => {
                if let Some(outer) = self.paragraph.take() {
                    self.suspended.push(outer);
                }
                self.paragraph = Some(Paragraph::default());
            }
            b"w:pPr" => self.in_paragraph_props = true,
            b"w:r" => self.run = RunFormat::default(),
            b"w:rPr" => self.in_run_props = true,
            b"w:t" => self.in_text = true,
            b"w:hyperlink" => self.hyperlink = self.hyperlink_target(e),
            _ => self.handle_property(e),
        }
    }

    fn handle_end(&mut self, name: &[u8]) {
        if is_skipped_subtree(name) {
            self.skip_depth = self.skip_depth.saturating_sub(1);
            return;
        }
        if self.skip_depth > 0 {
            return;
        }
        match name {
            b"w:tbl" => {
                if let Some(mut table) = self.tables.pop() {
                    if let Some(row) = table.current_row.take() {
                        table.rows.push(row);
                    }
                    self.push_block(Block::Table(table.rows));
                }
            }
            b"w:tr" => {
                if let Some(table) = self.tables.last_mut() {
                    if let Some(row) = table.current_row.take() {
                        table.rows.push(row);
                    }
                }
            }
            b"w:tc" => {
                // The body sink at index 0 is never popped
                if self.sinks.len() > 1 {
                    let cell = self.sinks.pop().unwrap_or_default();
                    if let Some(row) = self.tables.last_mut().and_then(|t| t.current_row.as_mut()) {
                        row.cells.push(cell);
                    }
                }
            }
            b"w:p" => {
                if let Some(mut paragraph) = self.paragraph.take() {
                    // w:ilvl without a w:numId
                    if matches!(&paragraph.numbering, Some((id, _)) if id.is_empty()) {
                        paragraph.numbering = None;
                    }
                    self.push_block(Block::Paragraph(paragraph));
                }
                self.paragraph = self.suspended.pop();
            }
            b"w:pPr" => self.in_paragraph_props = false,
            b"w:rPr" => self.in_run_props = false,
            b"w:t" => self.in_text = false,
            b"w:hyperlink" => self.hyperlink = None,
            _ => {}
        }
    }

    fn into_blocks(mut self) -> Vec<Block> {
        if let Some(paragraph) = self.paragraph.take() {
            self.push_block(Block::Paragraph(paragraph));
        }
        while let Some(paragraph) = self.suspended.pop() {
            self.push_block(Block::Paragraph(paragraph));
        }
        // Unbalanced markup: fold any open cells back into the body
        let mut blocks = Vec::new();
        for sink in self.sinks {
            blocks.extend(sink);
        }
        blocks
    }
}

fn is_skipped_subtree(name: &[u8]) -> bool {
    matches!(name, b"w:del" | b"mc:Fallback")
}

fn is_val_off(e: &BytesStart) -> bool {
    matches!(
        get_attr(e, b"w:val").as_deref(),
        Some("0") | Some("false") | Some("none")
    )
}

/// Walks `word/document.xml` and returns its top-level blocks in order.
pub(super) fn walk_body(
    xml: &str,
    relationships: &HashMap<String, String>,
) -> Result<Vec<Block>, DocumentError> {
    let mut walker = BodyWalker::new(relationships);
    let mut reader = Reader::from_str(xml);
    // Whitespace inside w:t is significant (xml:space="preserve")
    reader.trim_text(false);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => walker.handle_start(&e),
            Ok(Event::Empty(e)) => walker.handle_property(&e),
            Ok(Event::Text(e)) if walker.in_text => {
                let text = e
                    .unescape()
                    .map_err(|err| DocumentError::Conversion(format!("bad text node: {}", err)))?;
                walker.push_text(&text);
            }
            Ok(Event::CData(e)) if walker.in_text => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                walker.push_text(&text);
            }
            Ok(Event::End(e)) => walker.handle_end(e.name().as_ref()),
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DocumentError::Conversion(format!(
                    "error parsing document.xml: {}",
                    e
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(walker.into_blocks())
}
