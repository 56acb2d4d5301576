//! HTML rendering of the block model.

use super::body::{Block, Inline, Paragraph, TableRow};
use super::parts::{Numbering, StyleRole, Styles};

/// Lookup tables needed to decide how a paragraph renders.
pub(super) struct RenderContext<'a> {
    pub styles: &'a Styles,
    pub numbering: &'a Numbering,
}

/// How a single paragraph renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParagraphKind {
    Plain,
    Heading(u8),
    ListItem { ordered: bool, level: u32 },
}

impl RenderContext<'_> {
    fn classify(&self, paragraph: &Paragraph) -> ParagraphKind {
        let role = paragraph
            .style_id
            .as_deref()
            .and_then(|id| self.styles.role(id));

        if let Some(StyleRole::Heading(level)) = role {
            return ParagraphKind::Heading(level);
        }
        if let Some((num_id, level)) = &paragraph.numbering {
            return ParagraphKind::ListItem {
                ordered: self.numbering.is_ordered(num_id, *level),
                level: *level,
            };
        }
        match role {
            Some(StyleRole::BulletList) => ParagraphKind::ListItem {
                ordered: false,
                level: 0,
            },
            Some(StyleRole::NumberedList) => ParagraphKind::ListItem {
                ordered: true,
                level: 0,
            },
            _ => ParagraphKind::Plain,
        }
    }
}

/// Escapes text for use in HTML content and double-quoted attributes.
pub(super) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_inlines(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Break => out.push_str("<br />"),
            Inline::Text {
                text,
                bold,
                italic,
                href,
            } => {
                if let Some(href) = href {
                    out.push_str(&format!("<a href=\"{}\">", escape_html(href)));
                }
                if *bold {
                    out.push_str("<strong>");
                }
                if *italic {
                    out.push_str("<em>");
                }
                out.push_str(&escape_html(text));
                if *italic {
                    out.push_str("</em>");
                }
                if *bold {
                    out.push_str("</strong>");
                }
                if href.is_some() {
                    out.push_str("</a>");
                }
            }
        }
    }
}

fn list_tag(ordered: bool) -> &'static str {
    if ordered {
        "ol"
    } else {
        "ul"
    }
}

/// Open lists while rendering a run of list items: `(tag, level)`, innermost
/// last. Every open list has an open `<li>`.
#[derive(Default)]
struct ListStack {
    open: Vec<(&'static str, u32)>,
}

impl ListStack {
    fn push_item(&mut self, ordered: bool, level: u32, content: &[Inline], out: &mut String) {
        let tag = list_tag(ordered);

        while matches!(self.open.last(), Some(&(_, open_level)) if open_level > level) {
            self.close_one(out);
        }

        match self.open.last() {
            Some(&(open_tag, open_level)) if open_level == level => {
                if open_tag == tag {
                    out.push_str("</li><li>");
                } else {
                    self.close_one(out);
                    self.open_list(tag, level, out);
                }
            }
            // Deeper level (nested inside the open <li>) or first item
            _ => self.open_list(tag, level, out),
        }

        render_inlines(content, out);
    }

    fn open_list(&mut self, tag: &'static str, level: u32, out: &mut String) {
        out.push_str(&format!("<{}><li>", tag));
        self.open.push((tag, level));
    }

    fn close_one(&mut self, out: &mut String) {
        if let Some((tag, _)) = self.open.pop() {
            out.push_str(&format!("</li></{}>", tag));
        }
    }

    fn close_all(&mut self, out: &mut String) {
        while !self.open.is_empty() {
            self.close_one(out);
        }
    }
}

fn render_table(rows: &[TableRow], ctx: &RenderContext<'_>, out: &mut String) {
    out.push_str("<table>");
    for row in rows {
        let cell_tag = if row.is_header { "th" } else { "td" };
        out.push_str("<tr>");
        for cell in &row.cells {
            out.push_str(&format!("<{}>", cell_tag));
            render_blocks(cell, ctx, out);
            out.push_str(&format!("</{}>", cell_tag));
        }
        out.push_str("</tr>");
    }
    out.push_str("</table>");
}

/// Renders blocks in order, grouping consecutive list items into lists.
/// Empty paragraphs are dropped.
pub(super) fn render_blocks(blocks: &[Block], ctx: &RenderContext<'_>, out: &mut String) {
    let mut lists = ListStack::default();

    for block in blocks {
        match block {
            Block::Paragraph(paragraph) if paragraph.is_empty() => {}
            Block::Paragraph(paragraph) => match ctx.classify(paragraph) {
                ParagraphKind::ListItem { ordered, level } => {
                    lists.push_item(ordered, level, &paragraph.inlines, out);
                }
                ParagraphKind::Heading(level) => {
                    lists.close_all(out);
                    out.push_str(&format!("<h{}>", level));
                    render_inlines(&paragraph.inlines, out);
                    out.push_str(&format!("</h{}>", level));
                }
                ParagraphKind::Plain => {
                    lists.close_all(out);
                    out.push_str("<p>");
                    render_inlines(&paragraph.inlines, out);
                    out.push_str("</p>");
                }
            },
            Block::Table(rows) => {
                lists.close_all(out);
                render_table(rows, ctx, out);
            }
        }
    }

    lists.close_all(out);
}
