//! Keyword normalization and case-insensitive matching.

/// Lowercases one character for comparison. Final sigma folds to `σ` so the
/// result does not depend on a character's position in a word.
fn fold_char(c: char) -> impl Iterator<Item = char> {
    c.to_lowercase().map(|lower| if lower == 'ς' { 'σ' } else { lower })
}

/// Case-folds `text` character by character.
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(fold_char).collect()
}

/// A caller-supplied keyword with its comparison form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    /// The keyword exactly as supplied; used as the output key
    pub original: String,
    /// Trimmed and case-folded
    pub normalized: String,
}

/// Normalizes keywords, dropping those that are blank. Order is preserved.
pub fn normalize_keywords<S: AsRef<str>>(keywords: &[S]) -> Vec<Keyword> {
    keywords
        .iter()
        .map(AsRef::as_ref)
        .filter_map(|original| {
            let normalized = fold_case(original.trim());
            (!normalized.is_empty()).then(|| Keyword {
                original: original.to_string(),
                normalized,
            })
        })
        .collect()
}

/// Collapses whitespace runs to a single space, trims, and case-folds.
pub fn normalize_text(text: &str) -> String {
    fold_case(&text.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Finds the first case-insensitive occurrence of `needle` in `text` and
/// returns the byte offset in `text` just past it.
///
/// Both sides go through `fold_case`. Folding can change byte lengths (`İ`
/// lowercases to two chars), so offsets in the folded text are mapped back to
/// the original.
pub fn find_after_case_insensitive(text: &str, needle: &str) -> Option<usize> {
    let needle = fold_case(needle);
    if needle.is_empty() {
        return None;
    }

    let mut lowered = String::with_capacity(text.len());
    // For each byte of `lowered`, the end offset in `text` of the char it came from
    let mut source_ends: Vec<usize> = Vec::with_capacity(text.len());
    for (idx, c) in text.char_indices() {
        let end = idx + c.len_utf8();
        for lower in fold_char(c) {
            lowered.push(lower);
            source_ends.resize(lowered.len(), end);
        }
    }

    let start = lowered.find(&needle)?;
    let last_byte = start + needle.len() - 1;
    source_ends.get(last_byte).copied()
}
