use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod backend;
pub mod config_file;
pub mod format;
pub mod validator;

// Re-export for convenience
pub use backend::{BackendError, PdfBackend};
pub use format::DocumentFormat;
pub use validator::{DEFAULT_MAX_FILE_SIZE, FileValidator, ValidationFailure, ValidationResult};

/// Structured candidate fields recovered from a CV.
///
/// Built once per parse and never mutated afterwards. Every field except
/// `full_text` is "found or absent": an extractor that finds nothing leaves
/// its field as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDocument {
    /// The complete decoded text, newlines preserved.
    pub full_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Lower-cased.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Hyphens replaced by spaces, whitespace runs collapsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Canonical city/region label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    /// Never `Some(vec![])`: an empty skill set is stored as `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
}

impl ParsedDocument {
    /// A document with only `full_text` set.
    pub fn from_text(full_text: impl Into<String>) -> Self {
        Self {
            full_text: full_text.into(),
            ..Default::default()
        }
    }

    /// Number of optional fields that were populated.
    pub fn found_fields(&self) -> usize {
        [
            self.full_name.is_some(),
            self.email.is_some(),
            self.phone.is_some(),
            self.address.is_some(),
            self.university.is_some(),
            self.education.is_some(),
            self.experience.is_some(),
            self.skills.is_some(),
        ]
        .into_iter()
        .filter(|found| *found)
        .count()
    }
}

/// A file handed to the parser: bytes plus the metadata a browser or
/// multipart upload would report.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    /// Declared MIME type. Frequently missing or wrong for DOCX uploads.
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type,
            bytes,
        }
    }

    /// Read a file from disk. No MIME type is declared; format detection
    /// falls back to the extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, None, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// The format this file would be decoded as, if any.
    pub fn format(&self) -> Option<DocumentFormat> {
        DocumentFormat::detect(&self.name, self.mime_type.as_deref())
    }
}

/// A decoder could not turn the file's bytes into text.
#[derive(Error, Debug)]
#[error("could not read {format} file ({message}); try again with a different file")]
pub struct DecodeError {
    pub format: DocumentFormat,
    pub message: String,
}

impl DecodeError {
    pub fn new(format: DocumentFormat, message: impl Into<String>) -> Self {
        Self {
            format,
            message: message.into(),
        }
    }
}
