use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Expand common typographic ligatures found in PDFs.
pub fn expand_ligatures(text: &str) -> String {
    text.replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
        .replace(['\u{FB05}', '\u{FB06}'], "st")
}

/// Split text into trimmed, non-empty lines, preserving order.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
    WS_RE.replace_all(text.trim(), " ").into_owned()
}

/// Length in characters, not bytes.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Keep at most the first `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Compose decomposed diacritics (e.g. `e` + U+0302 + U+0301 → `ế`).
///
/// DOCX and PDF producers sometimes emit Vietnamese text in NFD, where
/// combining marks are not letters.
pub fn nfc(text: &str) -> String {
    text.nfc().collect()
}
