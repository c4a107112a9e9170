use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;
use crate::text_processing::{char_len, nfc};

const MIN_WORDS: usize = 2;
const MAX_WORDS: usize = 5;
const MIN_CHARS: usize = 10;
const MAX_CHARS: usize = 50;

/// Find the candidate's full name among the first lines of the CV.
///
/// A line qualifies when it contains only letters and whitespace, has
/// 2-5 words and 10-50 characters, and every word is capitalized (one
/// upper-case letter followed by lower-case letters). The first qualifying
/// line wins.
pub fn extract_name(lines: &[&str]) -> Option<String> {
    extract_name_with_config(lines, &ParsingConfig::default())
}

pub(crate) fn extract_name_with_config(lines: &[&str], config: &ParsingConfig) -> Option<String> {
    lines
        .iter()
        .take(config.name_max_lines)
        .map(|line| nfc(line))
        .find(|line| is_name_line(line))
}

/// Whether a single (trimmed, NFC) line has the shape of a person's name.
pub fn is_name_line(line: &str) -> bool {
    // Anything that is not a letter or whitespace: digits, '@', punctuation.
    static NON_NAME_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\s]").unwrap());
    static NAME_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{Lu}\p{Ll}*$").unwrap());

    if NON_NAME_CHAR.is_match(line) {
        return false;
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    if !(MIN_WORDS..=MAX_WORDS).contains(&words.len()) {
        return false;
    }

    let len = char_len(line);
    if !(MIN_CHARS..=MAX_CHARS).contains(&len) {
        return false;
    }

    words.iter().all(|w| NAME_WORD.is_match(w))
}
