use crate::config::ParsingConfig;
use crate::text_processing::{char_len, collapse_whitespace};

/// Degree and study keywords, matched case-insensitively as substrings.
pub(crate) const DEFAULT_EDUCATION_KEYWORDS: &[&str] = &[
    "cử nhân",
    "bachelor",
    "thạc sĩ",
    "master",
    "tiến sĩ",
    "phd",
    "gpa",
    "major",
    "chuyên ngành",
];

/// Find a short education snippet.
///
/// The first line mentioning a degree keyword is taken together with the
/// following lines (three lines in total by default). The snippet is kept
/// only if its length falls within the configured bounds; otherwise the scan
/// continues with the next keyword line.
pub fn extract_education(lines: &[&str]) -> Option<String> {
    extract_education_with_config(lines, &ParsingConfig::default())
}

pub(crate) fn extract_education_with_config(
    lines: &[&str],
    config: &ParsingConfig,
) -> Option<String> {
    let keywords: Vec<String> = config
        .education_keywords
        .resolve(&owned(DEFAULT_EDUCATION_KEYWORDS))
        .iter()
        .map(|k| k.to_lowercase())
        .collect();

    for (i, line) in lines.iter().enumerate() {
        if !contains_any(line, &keywords) {
            continue;
        }
        let end = (i + config.education_window.max(1)).min(lines.len());
        let snippet = collapse_whitespace(&lines[i..end].join(" "));
        let len = char_len(&snippet);
        if (config.education_min_chars..=config.education_max_chars).contains(&len) {
            return Some(snippet);
        }
    }
    None
}

/// Case-insensitive substring test against already lower-cased keywords.
pub(crate) fn contains_any(line: &str, lowered_keywords: &[String]) -> bool {
    let lower = collapse_whitespace(&line.to_lowercase());
    lowered_keywords.iter().any(|k| lower.contains(k.as_str()))
}

pub(crate) fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
