//! Log preview truncation.

/// Returns at most `max_chars` characters of `text`, with an ellipsis marker
/// when something was cut. Never splits a UTF-8 sequence.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}... ({} bytes total)", &text[..byte_idx], text.len()),
        None => text.to_string(),
    }
}
