//! Canonical display forms for extracted phone numbers, cities and skills.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::text_processing::collapse_whitespace;

/// Label stored for any match of the `TP.HCM` abbreviation family.
pub const HCM_CANONICAL: &str = "TP. Hồ Chí Minh";

/// Lower-case skill keyword → display form.
///
/// Keywords missing from this table are displayed with their first
/// character upper-cased.
pub(crate) const SKILL_CAPITALIZATION: &[(&str, &str)] = &[
    ("javascript", "JavaScript"),
    ("typescript", "TypeScript"),
    ("reactjs", "React"),
    ("react native", "React Native"),
    ("vue", "Vue"),
    ("vuejs", "Vue"),
    ("nodejs", "Node.js"),
    ("node.js", "Node.js"),
    ("next.js", "Next.js"),
    ("nextjs", "Next.js"),
    ("nestjs", "NestJS"),
    ("fastapi", "FastAPI"),
    ("postgresql", "PostgreSQL"),
    ("mysql", "MySQL"),
    ("mongodb", "MongoDB"),
    ("restful", "RESTful"),
    ("api", "API"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("sql", "SQL"),
    ("aws", "AWS"),
    ("gcp", "GCP"),
    ("azure", "Azure"),
    ("graphql", "GraphQL"),
    ("jquery", "jQuery"),
    ("github", "GitHub"),
    ("gitlab", "GitLab"),
    ("php", "PHP"),
    ("c++", "C++"),
    ("c#", "C#"),
    (".net", ".NET"),
    ("asp.net", "ASP.NET"),
    ("golang", "Go"),
    ("ci/cd", "CI/CD"),
    ("oop", "OOP"),
];

static DEFAULT_CAPITALIZATION: Lazy<HashMap<String, String>> = Lazy::new(|| {
    SKILL_CAPITALIZATION
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
});

/// Lookup table built from the defaults plus any configured entries.
/// Later entries override earlier ones.
pub(crate) fn capitalization_table(entries: &[(String, String)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_lowercase(), v.clone()))
        .collect()
}

/// Display form of a matched skill keyword.
pub fn canonicalize_skill(keyword: &str) -> String {
    canonicalize_skill_with(keyword, &DEFAULT_CAPITALIZATION)
}

pub(crate) fn canonicalize_skill_with(keyword: &str, table: &HashMap<String, String>) -> String {
    if let Some(display) = table.get(&keyword.to_lowercase()) {
        return display.clone();
    }
    let mut chars = keyword.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Normalize a matched phone number: hyphens become spaces and whitespace
/// runs collapse to one space. Dots are kept.
pub fn normalize_phone(raw: &str) -> String {
    collapse_whitespace(&raw.replace('-', " "))
}

/// Collapse an institution name to single-spaced, trimmed text.
pub fn normalize_institution(raw: &str) -> String {
    collapse_whitespace(raw)
}
