//! PDF → text through a pluggable [`PdfBackend`].

use cvscan_core::{DecodeError, DocumentFormat, PdfBackend};
use cvscan_parsing::text_processing::expand_ligatures;

/// Join page tokens into document text.
///
/// Tokens on a page are joined with single spaces and pages with a newline.
/// No attempt is made to rebuild the visual layout, so a multi-line page
/// comes out as one long line.
pub fn join_page_tokens(pages: &[Vec<String>]) -> String {
    pages
        .iter()
        .map(|tokens| tokens.join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extract the text of an in-memory PDF with `backend`.
pub fn decode_pdf(data: &[u8], backend: &dyn PdfBackend) -> Result<String, DecodeError> {
    let pages = backend
        .extract_page_tokens(data)
        .map_err(|e| DecodeError::new(DocumentFormat::Pdf, e.to_string()))?;

    let text = expand_ligatures(&join_page_tokens(&pages));
    tracing::debug!(
        format = "pdf",
        pages = pages.len(),
        chars = text.chars().count(),
        "decoded document"
    );
    Ok(text)
}
