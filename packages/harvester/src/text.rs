//! Character-level slicing and numeric cleanup used by the field extractors.
//!
//! Posting text is Danish, so every positional operation here counts
//! characters rather than bytes.

use regex::Regex;
use std::sync::LazyLock;

/// Digits and the two numeric separators.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NUMERIC_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9.,]").expect("valid regex"));

/// Anything that is not a digit or numeric separator.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NON_NUMERIC_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.,]").expect("valid regex"));

/// Separator substituted for non-numeric characters before splitting.
const GROUP_SEPARATOR: &str = ":";

/// Return `text` without its last character.
pub fn drop_last_char(text: &str) -> &str {
    match text.char_indices().next_back() {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Return `text` without its first `n` characters.
pub fn drop_first_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[idx..],
        None => "",
    }
}

/// Return at most the first `n` characters of `text`.
pub fn take_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Return the text up to the first newline.
pub fn first_line(text: &str) -> &str {
    text.split('\n').next().unwrap_or_default()
}

/// Return everything after the first occurrence of `marker`.
pub fn following<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    text.split_once(marker).map(|(_, rest)| rest)
}

/// Remove digits and numeric separators.
pub fn strip_numeric(text: &str) -> String {
    NUMERIC_CHARS.replace_all(text, "").into_owned()
}

/// Keep only digits and numeric separators.
pub fn keep_numeric(text: &str) -> String {
    NON_NUMERIC_CHARS.replace_all(text, "").into_owned()
}

/// Split text into its numeric groups.
///
/// Every non-numeric character becomes a group boundary, so consecutive
/// non-numeric characters produce empty groups.
pub fn numeric_groups(text: &str) -> Vec<String> {
    NON_NUMERIC_CHARS
        .replace_all(text, GROUP_SEPARATOR)
        .split(GROUP_SEPARATOR)
        .map(String::from)
        .collect()
}
