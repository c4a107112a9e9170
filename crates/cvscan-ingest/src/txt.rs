//! Plain text pass-through.

use cvscan_core::{DecodeError, DocumentFormat};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Read the bytes as UTF-8 verbatim, dropping a leading byte-order mark.
pub fn decode_txt(data: &[u8]) -> Result<String, DecodeError> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let text = std::str::from_utf8(data).map_err(|e| {
        DecodeError::new(
            DocumentFormat::Txt,
            format!("not valid UTF-8 (first bad byte at offset {})", e.valid_up_to()),
        )
    })?;
    tracing::debug!(format = "txt", chars = text.chars().count(), "decoded document");
    Ok(text.to_string())
}
