use cvscan_core::ParsedDocument;

use crate::config::ParsingConfig;
use crate::text_processing::{char_len, nfc, split_lines};
use crate::{address, contact, education, experience, name, skills, university};

/// A way of turning decoded CV text into structured fields.
///
/// The orchestrator only sees this trait, so a different strategy can be
/// swapped in without touching decoding or validation.
pub trait ExtractionStrategy: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Extract every field from `full_text`. Never fails: a field that
    /// cannot be found is simply absent.
    fn extract(&self, full_text: &str) -> ParsedDocument;
}

/// Rule-based extraction built from the regex and keyword heuristics.
///
/// Holds a [`ParsingConfig`] and exposes each field extractor as a method.
/// The default constructor uses built-in defaults; use
/// [`HeuristicExtractor::with_config`] to supply custom tables and limits.
#[derive(Debug, Clone, Default)]
pub struct HeuristicExtractor {
    config: ParsingConfig,
}

impl HeuristicExtractor {
    /// Create an extractor with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: ParsingConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the current config.
    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    pub fn full_name(&self, lines: &[&str]) -> Option<String> {
        name::extract_name_with_config(lines, &self.config)
    }

    pub fn email(&self, text: &str) -> Option<String> {
        contact::extract_email_with_config(text, &self.config)
    }

    pub fn phone(&self, text: &str) -> Option<String> {
        contact::extract_phone_with_config(text, &self.config)
    }

    pub fn address(&self, text: &str) -> Option<String> {
        address::extract_address_with_config(text, &self.config)
    }

    pub fn university(&self, text: &str) -> Option<String> {
        university::extract_university_with_config(text, &self.config)
    }

    pub fn education(&self, lines: &[&str]) -> Option<String> {
        education::extract_education_with_config(lines, &self.config)
    }

    pub fn experience(&self, lines: &[&str]) -> Option<String> {
        experience::extract_experience_with_config(lines, &self.config)
    }

    pub fn skills(&self, text: &str) -> Option<Vec<String>> {
        skills::extract_skills_with_config(text, &self.config)
    }
}

impl ExtractionStrategy for HeuristicExtractor {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn extract(&self, full_text: &str) -> ParsedDocument {
        // Patterns are written against precomposed diacritics; `full_text`
        // is still stored as decoded.
        let text = nfc(full_text);
        let lines = split_lines(&text);

        let doc = ParsedDocument {
            full_text: full_text.to_string(),
            full_name: self.full_name(&lines),
            email: self.email(&text),
            phone: self.phone(&text),
            address: self.address(&text),
            university: self.university(&text),
            education: self.education(&lines),
            experience: self.experience(&lines),
            skills: self.skills(&text),
        };

        let fields: [(&str, Option<usize>); 8] = [
            ("full_name", doc.full_name.as_deref().map(char_len)),
            ("email", doc.email.as_deref().map(char_len)),
            ("phone", doc.phone.as_deref().map(char_len)),
            ("address", doc.address.as_deref().map(char_len)),
            ("university", doc.university.as_deref().map(char_len)),
            ("education", doc.education.as_deref().map(char_len)),
            ("experience", doc.experience.as_deref().map(char_len)),
            ("skills", doc.skills.as_ref().map(Vec::len)),
        ];
        for (field, size) in fields {
            match size {
                Some(len) => tracing::debug!(field, len, "field extracted"),
                None => tracing::debug!(field, "field not found"),
            }
        }

        doc
    }
}
