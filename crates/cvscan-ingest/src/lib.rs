use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod archive;
pub mod docx;
pub mod pdf;
pub mod txt;

// Re-export domain types for convenience
pub use cvscan_core::{
    DecodeError, DocumentFormat, FileValidator, ParsedDocument, PdfBackend, UploadedFile,
    ValidationResult,
};
pub use cvscan_parsing::{ExtractionStrategy, HeuristicExtractor};
// Re-export archive API
pub use archive::{
    ArchiveContents, ArchiveEntry, ArchiveError, DEFAULT_MAX_ARCHIVE_SIZE, extract_archive,
    is_archive_name,
};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("unsupported file type: {0} (only PDF, DOCX or TXT files are accepted)")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The parse pipeline: pick a decoder, decode, then hand the text to the
/// extraction strategy.
///
/// Both the strategy and the PDF backend are `Send + Sync`, so one parser can
/// be shared across threads.
pub struct CvParser {
    strategy: Box<dyn ExtractionStrategy>,
    pdf_backend: Option<Box<dyn PdfBackend>>,
    validator: FileValidator,
}

impl Default for CvParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CvParser {
    /// Heuristic extraction, the default validator and, with the `pdf`
    /// feature, the MuPDF backend.
    pub fn new() -> Self {
        Self {
            strategy: Box::new(HeuristicExtractor::new()),
            pdf_backend: default_pdf_backend(),
            validator: FileValidator::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: impl ExtractionStrategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    pub fn with_pdf_backend(mut self, backend: impl PdfBackend + 'static) -> Self {
        self.pdf_backend = Some(Box::new(backend));
        self
    }

    pub fn with_validator(mut self, validator: FileValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn strategy(&self) -> &dyn ExtractionStrategy {
        self.strategy.as_ref()
    }

    pub fn validator(&self) -> &FileValidator {
        &self.validator
    }

    /// Check the file's metadata against the allow-list and size ceiling.
    /// Decoding is never attempted here.
    pub fn validate(&self, file: &UploadedFile) -> ValidationResult {
        self.validator.validate(file)
    }

    /// Select the decoder for `file` and return its plain text.
    pub fn decode(&self, file: &UploadedFile) -> Result<(DocumentFormat, String), ParseError> {
        let format = file
            .format()
            .ok_or_else(|| ParseError::UnsupportedFormat(file.name.clone()))?;

        let result = match format {
            DocumentFormat::Pdf => match &self.pdf_backend {
                Some(backend) => pdf::decode_pdf(&file.bytes, backend.as_ref()),
                None => Err(DecodeError::new(
                    DocumentFormat::Pdf,
                    "PDF support not compiled in (enable the `pdf` feature of cvscan-ingest)",
                )),
            },
            DocumentFormat::Docx => docx::decode_docx(&file.bytes),
            DocumentFormat::Txt => txt::decode_txt(&file.bytes),
        };

        match result {
            Ok(text) => Ok((format, text)),
            Err(e) => {
                tracing::warn!(file = %file.name, %format, error = %e.message, "decode failed");
                Err(e.into())
            }
        }
    }

    /// Parse one uploaded CV.
    ///
    /// Fails only when the file type is not recognized or its decoder fails.
    /// Once text is available extraction always succeeds; fields that could
    /// not be found are left unset.
    pub fn parse_cv(&self, file: &UploadedFile) -> Result<ParsedDocument, ParseError> {
        let (format, text) = self.decode(file)?;
        let doc = self.strategy.extract(&text);
        tracing::info!(
            file = %file.name,
            %format,
            strategy = self.strategy.name(),
            chars = text.chars().count(),
            fields = doc.found_fields(),
            "parsed CV"
        );
        Ok(doc)
    }

    /// Read `path` from disk and parse it.
    pub fn parse_path(&self, path: &Path) -> Result<ParsedDocument, ParseError> {
        let file = UploadedFile::from_path(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_cv(&file)
    }
}

#[cfg(feature = "pdf")]
fn default_pdf_backend() -> Option<Box<dyn PdfBackend>> {
    Some(Box::new(cvscan_pdf_mupdf::MupdfBackend::default()))
}

#[cfg(not(feature = "pdf"))]
fn default_pdf_backend() -> Option<Box<dyn PdfBackend>> {
    None
}

/// Parse a CV with the default pipeline.
pub fn parse_cv(file: &UploadedFile) -> Result<ParsedDocument, ParseError> {
    CvParser::new().parse_cv(file)
}
