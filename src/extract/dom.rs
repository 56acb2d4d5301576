//! Block-level DOM access for the extractor.
//!
//! The extractor only needs three things from a markup node: its kind, its
//! trimmed text, and the trimmed texts of its list items or table cells.
//! `BlockElement` captures that, and `ScraperBlock` implements it on top of
//! `scraper`.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use crate::utils::parse_selector_unsafe;

const BLOCK_SELECTOR_STR: &str = "p, h1, h2, h3, ul, table";
const LIST_ITEM_SELECTOR_STR: &str = "li";
const TABLE_CELL_SELECTOR_STR: &str = "th, td";

static BLOCK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(BLOCK_SELECTOR_STR, "BLOCK_SELECTOR"));
static LIST_ITEM_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(LIST_ITEM_SELECTOR_STR, "LIST_ITEM_SELECTOR"));
static TABLE_CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(TABLE_CELL_SELECTOR_STR, "TABLE_CELL_SELECTOR"));

/// Kinds of block element considered during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `p`
    Paragraph,
    /// `h1`..`h3`
    Heading(u8),
    /// `ul`
    UnorderedList,
    /// `table`
    Table,
}

/// Child items an element can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKind {
    /// `li` descendants
    ListItem,
    /// `th` and `td` descendants, in document order
    TableCell,
}

/// Minimal view of a block element.
pub trait BlockElement {
    /// Which block kind this element is.
    fn kind(&self) -> ElementKind;

    /// Full text content, trimmed.
    fn trimmed_text(&self) -> String;

    /// Trimmed text of every descendant of the given kind, in document order.
    fn child_texts(&self, child: ChildKind) -> Vec<String>;
}

/// A block element of a `scraper` document.
#[derive(Debug, Clone, Copy)]
pub struct ScraperBlock<'a> {
    element: ElementRef<'a>,
    kind: ElementKind,
}

impl<'a> ScraperBlock<'a> {
    fn new(element: ElementRef<'a>) -> Option<Self> {
        let kind = match element.value().name() {
            "p" => ElementKind::Paragraph,
            "h1" => ElementKind::Heading(1),
            "h2" => ElementKind::Heading(2),
            "h3" => ElementKind::Heading(3),
            "ul" => ElementKind::UnorderedList,
            "table" => ElementKind::Table,
            _ => return None,
        };
        Some(Self { element, kind })
    }
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

impl BlockElement for ScraperBlock<'_> {
    fn kind(&self) -> ElementKind {
        self.kind
    }

    fn trimmed_text(&self) -> String {
        element_text(&self.element)
    }

    fn child_texts(&self, child: ChildKind) -> Vec<String> {
        let selector: &Selector = match child {
            ChildKind::ListItem => &*LIST_ITEM_SELECTOR,
            ChildKind::TableCell => &*TABLE_CELL_SELECTOR,
        };
        self.element
            .select(selector)
            .map(|item| element_text(&item))
            .collect()
    }
}

/// Collects every selected block of `document` in document order.
///
/// Nested matches are included, so a `<p>` inside a table cell is yielded
/// after the `<table>` that contains it.
pub fn select_blocks(document: &Html) -> Vec<ScraperBlock<'_>> {
    document
        .select(&BLOCK_SELECTOR)
        .filter_map(ScraperBlock::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_blocks_in_document_order() {
        let document = Html::parse_fragment(
            "<h1>A</h1><div><p>B</p></div><h4>ignored</h4><table><tr><td><p>C</p></td></tr></table><ol><li>ignored</li></ol><ul><li>D</li></ul>",
        );
        let kinds: Vec<ElementKind> = select_blocks(&document).iter().map(|b| b.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ElementKind::Heading(1),
                ElementKind::Paragraph,
                ElementKind::Table,
                ElementKind::Paragraph,
                ElementKind::UnorderedList,
            ]
        );
    }

    #[test]
    fn test_trimmed_text_includes_descendants() {
        let document = Html::parse_fragment("<p>  Name: <strong>John</strong> Doe \n</p>");
        let blocks = select_blocks(&document);
        assert_eq!(blocks[0].trimmed_text(), "Name: John Doe");
    }

    #[test]
    fn test_child_texts() {
        let document = Html::parse_fragment(
            "<ul><li> A </li><li>B</li></ul><table><tr><th>X</th><td> Y </td></tr><tr><td>Z</td></tr></table>",
        );
        let blocks = select_blocks(&document);
        assert_eq!(blocks[0].child_texts(ChildKind::ListItem), vec!["A", "B"]);
        assert_eq!(
            blocks[1].child_texts(ChildKind::TableCell),
            vec!["X", "Y", "Z"]
        );
    }
}
