use thiserror::Error;

use crate::{DocumentFormat, UploadedFile};

/// Default upload ceiling: 5 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Why a file was rejected before decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("only PDF, DOCX or TXT files are accepted")]
    UnsupportedFormat,
    #[error("file must not exceed {}", format_size(.max_size))]
    TooLarge { size: u64, max_size: u64 },
    #[error("file is empty")]
    Empty,
}

/// Outcome of [`FileValidator::validate`].
///
/// A rejected file is a normal result, not an error value: `valid == false`
/// always comes with a human-readable `error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub error: Option<String>,
    pub failure: Option<ValidationFailure>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
            failure: None,
        }
    }

    pub fn rejected(failure: ValidationFailure) -> Self {
        Self {
            valid: false,
            error: Some(failure.to_string()),
            failure: Some(failure),
        }
    }
}

/// Pre-decode checks over file metadata: format allow-list, then size.
#[derive(Debug, Clone, Copy)]
pub struct FileValidator {
    max_size: u64,
}

impl Default for FileValidator {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl FileValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    pub fn validate(&self, file: &UploadedFile) -> ValidationResult {
        self.validate_metadata(&file.name, file.mime_type.as_deref(), file.size())
    }

    /// Rules are applied in order and the first failure wins.
    pub fn validate_metadata(&self, name: &str, mime: Option<&str>, size: u64) -> ValidationResult {
        if DocumentFormat::detect(name, mime).is_none() {
            return ValidationResult::rejected(ValidationFailure::UnsupportedFormat);
        }
        if size > self.max_size {
            return ValidationResult::rejected(ValidationFailure::TooLarge {
                size,
                max_size: self.max_size,
            });
        }
        if size == 0 {
            return ValidationResult::rejected(ValidationFailure::Empty);
        }
        ValidationResult::ok()
    }
}

fn format_size(bytes: &u64) -> String {
    let bytes = *bytes;
    if bytes >= 1024 * 1024 && bytes % (1024 * 1024) == 0 {
        format!("{}MB", bytes / (1024 * 1024))
    } else if bytes >= 1024 {
        format!("{:.1}KB", bytes as f64 / 1024.0)
    } else {
        format!("{} bytes", bytes)
    }
}
