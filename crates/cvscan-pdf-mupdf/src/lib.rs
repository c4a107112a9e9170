use mupdf::{Document, TextPageFlags};

use cvscan_core::{BackendError, PdfBackend};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency
/// (which is AGPL-3.0) so that DOCX and TXT code paths do not transitively
/// depend on it.
///
/// Every text line MuPDF reports becomes one token. Blank lines are
/// dropped unless [`MupdfBackend::keep_blank_lines`] is set.
#[derive(Debug, Clone, Default)]
pub struct MupdfBackend {
    keep_blank_lines: bool,
}

impl MupdfBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep tokens that are empty or whitespace only.
    pub fn keep_blank_lines(mut self, keep: bool) -> Self {
        self.keep_blank_lines = keep;
        self
    }
}

impl PdfBackend for MupdfBackend {
    fn extract_page_tokens(&self, data: &[u8]) -> Result<Vec<Vec<String>>, BackendError> {
        let document = Document::from_bytes(data, "application/pdf")
            .map_err(|e| BackendError::OpenError(e.to_string()))?;

        let mut pages = Vec::new();

        for page_result in document
            .pages()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?
        {
            let page = page_result.map_err(|e| BackendError::ExtractionError(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

            let mut tokens = Vec::new();
            for block in text_page.blocks() {
                for line in block.lines() {
                    let token: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    if self.keep_blank_lines || !token.trim().is_empty() {
                        tokens.push(token);
                    }
                }
            }
            pages.push(tokens);
        }

        tracing::debug!(pages = pages.len(), "mupdf extracted page tokens");
        Ok(pages)
    }
}
