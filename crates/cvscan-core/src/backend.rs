use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
}

/// Trait for PDF text extraction backends.
///
/// Implementors only report the text tokens of each page, in page order and
/// in the order the engine yields them. Joining tokens into the document
/// text lives in the ingest crate's PDF decoder.
pub trait PdfBackend: Send + Sync {
    /// Extract the text tokens of every page of an in-memory PDF.
    fn extract_page_tokens(&self, data: &[u8]) -> Result<Vec<Vec<String>>, BackendError>;
}
