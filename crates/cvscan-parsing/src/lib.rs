//! Heuristic field extraction from decoded CV text.
//!
//! Each field has its own module with a plain `extract_*` function using the
//! built-in tables and a `*_with_config` variant used by
//! [`HeuristicExtractor`]. Vietnamese and English are handled side by side.

pub mod address;
pub mod config;
pub mod contact;
pub mod education;
pub mod experience;
pub mod extractor;
pub mod name;
pub mod normalize;
pub mod skills;
pub mod text_processing;
pub mod university;

pub use address::{AddressPattern, extract_address};
pub use config::{ListOverride, ParsingConfig, ParsingConfigBuilder};
pub use contact::{extract_email, extract_phone};
pub use education::extract_education;
pub use experience::extract_experience;
pub use extractor::{ExtractionStrategy, HeuristicExtractor};
pub use name::extract_name;
pub use skills::{SkillKeyword, extract_skills};
pub use university::extract_university;
// Re-export domain types from core (canonical definitions live there)
pub use cvscan_core::ParsedDocument;

/// Run every field extractor over `text` with the default configuration.
pub fn extract_fields(text: &str) -> ParsedDocument {
    HeuristicExtractor::new().extract(text)
}
