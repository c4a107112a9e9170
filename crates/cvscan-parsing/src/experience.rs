use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;
use crate::education::{contains_any, owned};
use crate::text_processing::{char_len, collapse_whitespace, truncate_chars};

/// Job-title keywords, matched case-insensitively as substrings.
pub(crate) const DEFAULT_EXPERIENCE_KEYWORDS: &[&str] = &[
    "developer",
    "engineer",
    "programmer",
    "lập trình viên",
    "frontend",
    "backend",
    "full stack",
    "fullstack",
    "software",
    "web",
    "mobile",
    "internship",
    "thực tập",
];

/// A year between 2010 and 2029.
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b20[12][0-9]\b").unwrap());

/// Build a short experience summary.
///
/// Every line carrying both a year (2010-2029) and a job keyword starts a
/// segment made of that line and the following lines (four in total by
/// default). Segments of at least 30 characters are collected and the scan
/// resumes after the lines they consumed, so a second dated job line inside
/// a collected window never starts a segment of its own. Segments are joined
/// with ". " and the result is cut to 300 characters.
pub fn extract_experience(lines: &[&str]) -> Option<String> {
    extract_experience_with_config(lines, &ParsingConfig::default())
}

pub(crate) fn extract_experience_with_config(
    lines: &[&str],
    config: &ParsingConfig,
) -> Option<String> {
    let keywords: Vec<String> = config
        .experience_keywords
        .resolve(&owned(DEFAULT_EXPERIENCE_KEYWORDS))
        .iter()
        .map(|k| k.to_lowercase())
        .collect();

    let mut segments: Vec<String> = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if YEAR_RE.is_match(line) && contains_any(line, &keywords) {
            // A zero window still consumes the keyword line itself.
            let end = (i + config.experience_window.max(1)).min(lines.len());
            let segment = collapse_whitespace(&lines[i..end].join(" "));
            if char_len(&segment) >= config.experience_min_chars {
                segments.push(segment);
                i = end;
                continue;
            }
        }
        i += 1;
    }

    if segments.is_empty() {
        return None;
    }
    Some(truncate_chars(
        &segments.join(". "),
        config.experience_max_chars,
    ))
}
