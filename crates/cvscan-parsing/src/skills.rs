use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;
use crate::normalize::{SKILL_CAPITALIZATION, canonicalize_skill_with, capitalization_table};

/// Technology keywords in display order. Matching is whole-word and
/// case-insensitive; the order here (not the order of appearance in the
/// CV) decides the order of the resulting skill list.
pub(crate) const DEFAULT_SKILL_KEYWORDS: &[&str] = &[
    // Languages
    "javascript",
    "typescript",
    "python",
    "java",
    "c++",
    "c#",
    "php",
    "golang",
    "ruby",
    "kotlin",
    "swift",
    "dart",
    // Front end
    "html",
    "css",
    "sass",
    "tailwind",
    "bootstrap",
    "jquery",
    "react",
    "reactjs",
    "react native",
    "redux",
    "vue",
    "vuejs",
    "angular",
    "next.js",
    "nextjs",
    "flutter",
    "webpack",
    "vite",
    // Back end
    "node.js",
    "nodejs",
    "express",
    "nestjs",
    "django",
    "flask",
    "fastapi",
    "spring",
    "laravel",
    "asp.net",
    ".net",
    "restful",
    "api",
    "graphql",
    // Data
    "sql",
    "mysql",
    "postgresql",
    "mongodb",
    "redis",
    "firebase",
    // Tooling and cloud
    "git",
    "github",
    "gitlab",
    "docker",
    "kubernetes",
    "jenkins",
    "ci/cd",
    "linux",
    "aws",
    "azure",
    "gcp",
    // Practices
    "oop",
    "agile",
    "scrum",
    "jira",
    "figma",
];

/// A skill keyword with its whole-word matcher.
#[derive(Debug, Clone)]
pub struct SkillKeyword {
    pub keyword: String,
    matcher: Regex,
}

impl SkillKeyword {
    /// Compile a whole-word, case-insensitive matcher for `keyword`.
    ///
    /// `\b` does not work for keywords that start or end with punctuation
    /// (`c++`, `.net`), so the boundaries are spelled out as "start of text
    /// or a non-word character" on each side.
    pub fn new(keyword: &str) -> Result<Self, regex::Error> {
        let keyword = keyword.trim().to_lowercase();
        let pattern = format!(r"(?i)(?:^|\W){}(?:\W|$)", regex::escape(&keyword));
        Ok(Self {
            matcher: Regex::new(&pattern)?,
            keyword,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }
}

pub(crate) static DEFAULT_SKILLS: Lazy<Vec<SkillKeyword>> = Lazy::new(|| {
    DEFAULT_SKILL_KEYWORDS
        .iter()
        .map(|k| SkillKeyword::new(k).unwrap())
        .collect()
});

pub(crate) static DEFAULT_CAPITALIZATION_ENTRIES: Lazy<Vec<(String, String)>> = Lazy::new(|| {
    SKILL_CAPITALIZATION
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
});

/// Recognized skills, canonically capitalized and de-duplicated.
///
/// Returns `None` rather than an empty list when nothing matched.
pub fn extract_skills(text: &str) -> Option<Vec<String>> {
    extract_skills_with_config(text, &ParsingConfig::default())
}

pub(crate) fn extract_skills_with_config(text: &str, config: &ParsingConfig) -> Option<Vec<String>> {
    let keywords = config.skill_keywords.resolve(&DEFAULT_SKILLS);
    let table = capitalization_table(
        &config
            .skill_capitalization
            .resolve(&DEFAULT_CAPITALIZATION_ENTRIES),
    );

    let mut seen = HashSet::new();
    let skills: Vec<String> = keywords
        .iter()
        .filter(|k| k.is_match(text))
        .map(|k| canonicalize_skill_with(&k.keyword, &table))
        .filter(|display| seen.insert(display.to_lowercase()))
        .collect();

    if skills.is_empty() { None } else { Some(skills) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_variants_collapse_to_one() {
        let skills = extract_skills("ReactJS, nodejs and Node.js").unwrap();
        assert_eq!(skills, vec!["React", "Node.js"]);
        assert_eq!(skills.iter().filter(|s| *s == "Node.js").count(), 1);
    }

    #[test]
    fn test_table_order_not_text_order() {
        let skills = extract_skills("Docker, Python, JavaScript").unwrap();
        assert_eq!(skills, vec!["JavaScript", "Python", "Docker"]);
    }

    #[test]
    fn test_whole_word_only() {
        // "expression" must not match "express", "javascript" must not match "java".
        assert_eq!(extract_skills("a regular expression"), None);
        assert_eq!(extract_skills("JavaScript").unwrap(), vec!["JavaScript"]);
    }

    #[test]
    fn test_punctuated_keywords() {
        let skills = extract_skills("C++, C# and ASP .NET; CI/CD pipelines").unwrap();
        assert_eq!(skills, vec!["C++", "C#", ".NET", "CI/CD"]);
    }

    #[test]
    fn test_canonical_and_fallback_capitalization() {
        let skills = extract_skills("mongodb, postgresql, docker, api, agile").unwrap();
        assert_eq!(
            skills,
            vec!["API", "PostgreSQL", "MongoDB", "Docker", "Agile"]
        );
    }

    #[test]
    fn test_vietnamese_context() {
        let skills = extract_skills("Kỹ năng: thành thạo Java, Spring và MySQL.").unwrap();
        assert_eq!(skills, vec!["Java", "Spring", "MySQL"]);
    }

    #[test]
    fn test_no_skills_is_none() {
        assert_eq!(extract_skills("Tôi là một người chăm chỉ"), None);
        assert_eq!(extract_skills(""), None);
    }

    #[test]
    fn test_replaced_keywords_and_capitalization() {
        use crate::ParsingConfigBuilder;
        let config = ParsingConfigBuilder::new()
            .set_skill_keywords(vec!["rust".into(), "tokio".into(), "python".into()])
            .add_skill_capitalization("tokio".into(), "Tokio".into())
            .build()
            .unwrap();
        let skills = extract_skills_with_config("Python; TOKIO runtime; rust", &config).unwrap();
        assert_eq!(skills, vec!["Rust", "Tokio", "Python"]);
        // Default keywords no longer apply.
        assert_eq!(extract_skills_with_config("Docker", &config), None);
    }

    #[test]
    fn test_asp_net_is_its_own_skill() {
        assert_eq!(
            extract_skills("5 years of ASP.NET MVC").unwrap(),
            vec!["ASP.NET"]
        );
        // A standalone ".NET" is still its own entry.
        assert_eq!(
            extract_skills("ASP.NET and .NET Core").unwrap(),
            vec!["ASP.NET", ".NET"]
        );
    }
}
