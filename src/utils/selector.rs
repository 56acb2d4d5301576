//! CSS selector and regex compilation utilities.

use regex::Regex;
use scraper::Selector;

/// Parses a CSS selector that must succeed (for compile-time constants).
///
/// This function panics if parsing fails, which is appropriate for static selectors
/// that are compile-time constants.
///
/// # Arguments
///
/// * `selector_str` - The CSS selector string to parse
/// * `context` - Context description for error messages
///
/// # Panics
///
/// Panics if the selector cannot be parsed (indicates a programming error).
pub fn parse_selector_unsafe(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        panic!(
            "Failed to parse CSS selector '{}' in {}: {}. This is a programming error.",
            selector_str, context, e
        )
    })
}

/// Compiles a regex pattern that must succeed, panicking with a detailed error
/// message otherwise. Used for static patterns that are compile-time constants.
pub fn compile_regex_unsafe(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selector_list() {
        let selector = parse_selector_unsafe("p, h1, h2, h3, ul, table", "test");
        let html = scraper::Html::parse_fragment("<p>a</p><ul><li>b</li></ul>");
        assert_eq!(html.select(&selector).count(), 2);
    }

    #[test]
    #[should_panic(expected = "programming error")]
    fn test_parse_selector_invalid_panics() {
        parse_selector_unsafe("p[", "test");
    }

    #[test]
    #[should_panic(expected = "programming error")]
    fn test_compile_regex_invalid_panics() {
        compile_regex_unsafe("(unclosed", "test");
    }
}
