//! Keyword-driven field extraction from HTML.
//!
//! Two passes run over the block elements (`p`, `h1`-`h3`, `ul`, `table`) of a
//! document, both writing into the same map:
//!
//! 1. **Inline**: an element containing `Keyword: value` yields `value`.
//! 2. **Label/value**: an element whose whole text is a keyword (and has no
//!    colon) becomes a pending label; the next element with different text
//!    supplies the value. Lists and tables are flattened with `" | "`.
//!
//! The second pass runs after the first, so a label/value match overwrites an
//! inline match for the same keyword.

mod dom;
mod keywords;

use std::collections::HashMap;

use scraper::Html;

use crate::config::VALUE_SEPARATOR;
pub use dom::{select_blocks, BlockElement, ChildKind, ElementKind, ScraperBlock};
pub use keywords::{normalize_keywords, normalize_text, Keyword};
use keywords::find_after_case_insensitive;

/// Extracted fields, keyed by the keyword exactly as the caller supplied it.
pub type StructuredData = HashMap<String, String>;

/// Extracts keyword values from an HTML document.
///
/// Keywords are matched case-insensitively after trimming; blank keywords are
/// ignored. Keywords with no match are absent from the result. The function is
/// pure, so repeated calls with the same input give the same output.
///
/// # Examples
///
/// ```
/// use gdoc_fields::extract_structured_data;
///
/// let data = extract_structured_data(
///     "<p>Customer Name: John Doe</p><h2>Product title</h2><p>Widget X</p>",
///     &["Customer Name", "Product title"],
/// );
/// assert_eq!(data["Customer Name"], "John Doe");
/// assert_eq!(data["Product title"], "Widget X");
/// ```
pub fn extract_structured_data<S: AsRef<str>>(html: &str, keywords: &[S]) -> StructuredData {
    let document = Html::parse_document(html);
    let blocks = select_blocks(&document);
    let keywords = normalize_keywords(keywords);
    let data = extract_from_blocks(&blocks, &keywords);
    log::debug!(
        "Extracted {} of {} keywords from {} block elements",
        data.len(),
        keywords.len(),
        blocks.len()
    );
    data
}

/// Runs both extraction passes over already-selected block elements.
pub fn extract_from_blocks<E: BlockElement>(blocks: &[E], keywords: &[Keyword]) -> StructuredData {
    let mut data = StructuredData::new();
    if keywords.is_empty() {
        return data;
    }
    inline_pass(blocks, keywords, &mut data);
    label_value_pass(blocks, keywords, &mut data);
    data
}

/// Pass 1: `Keyword: value` inside a single element.
fn inline_pass<E: BlockElement>(blocks: &[E], keywords: &[Keyword], data: &mut StructuredData) {
    for block in blocks {
        let text = block.trimmed_text();
        for keyword in keywords {
            let Some(after_keyword) = find_after_case_insensitive(&text, &keyword.normalized)
            else {
                continue;
            };
            let remainder = &text[after_keyword..];
            // Without a colon the keyword is a plain mention; pass 2 may still
            // pick it up as a label
            let Some(colon) = remainder.find(':') else {
                continue;
            };
            let value = remainder[colon + 1..].trim();
            if !value.is_empty() {
                data.insert(keyword.original.clone(), value.to_string());
            }
        }
    }
}

/// Second-pass scanner state. At most one label waits for its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelState<'k> {
    Idle,
    Pending(&'k Keyword),
}

/// Value text of an element that follows a label.
fn value_text<E: BlockElement>(block: &E, trimmed: String) -> String {
    match block.kind() {
        ElementKind::UnorderedList => block.child_texts(ChildKind::ListItem).join(VALUE_SEPARATOR),
        ElementKind::Table => block.child_texts(ChildKind::TableCell).join(VALUE_SEPARATOR),
        ElementKind::Paragraph | ElementKind::Heading(_) => trimmed,
    }
}

/// Pass 2: a label element followed by its value element.
fn label_value_pass<E: BlockElement>(
    blocks: &[E],
    keywords: &[Keyword],
    data: &mut StructuredData,
) {
    let mut state = LabelState::Idle;

    for block in blocks {
        let trimmed = block.trimmed_text();
        if trimmed.is_empty() {
            continue;
        }
        let normalized = normalize_text(&trimmed);

        state = match state {
            // Repeated label heading; keep waiting
            LabelState::Pending(label) if normalized == label.normalized => state,
            LabelState::Pending(label) => {
                let value = value_text(block, trimmed);
                if value.is_empty() {
                    state
                } else {
                    data.insert(label.original.clone(), value);
                    LabelState::Idle
                }
            }
            LabelState::Idle if trimmed.contains(':') => LabelState::Idle,
            LabelState::Idle => keywords
                .iter()
                .find(|keyword| keyword.normalized == normalized)
                .map_or(LabelState::Idle, LabelState::Pending),
        };
    }

    if let LabelState::Pending(label) = state {
        log::debug!("Label '{}' never received a value", label.original);
    }
}
