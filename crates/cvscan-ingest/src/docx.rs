//! DOCX → raw paragraph text.
//!
//! Only `word/document.xml` is read. Text runs are concatenated, `<w:tab/>`
//! becomes a tab, `<w:br/>` and `<w:cr/>` become newlines, and every
//! paragraph is followed by a blank line. Headers, footers, footnotes and
//! text boxes stored in other parts are not included.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;

use cvscan_core::{DecodeError, DocumentFormat};

const DOCUMENT_PART: &str = "word/document.xml";

fn decode_error(message: impl Into<String>) -> DecodeError {
    DecodeError::new(DocumentFormat::Docx, message)
}

/// Extract the raw text of a DOCX file held in memory.
pub fn decode_docx(data: &[u8]) -> Result<String, DecodeError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))
        .map_err(|e| decode_error(format!("not a ZIP container: {e}")))?;

    let mut xml = Vec::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|_| decode_error(format!("missing {DOCUMENT_PART}")))?
        .read_to_end(&mut xml)
        .map_err(|e| decode_error(format!("failed to read {DOCUMENT_PART}: {e}")))?;

    let text = document_text(&xml)?;
    tracing::debug!(format = "docx", chars = text.chars().count(), "decoded document");
    Ok(text)
}

/// Walk the WordprocessingML body and collect paragraph text.
fn document_text(xml: &[u8]) -> Result<String, DecodeError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut out = String::new();
    // Depth of open <w:t> elements; text outside them is layout whitespace.
    let mut in_text = 0u32;
    // <w:tabs> holds tab-stop definitions that are also named <w:tab/>.
    let mut in_tab_stops = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text += 1,
                b"tabs" => in_tab_stops = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"tab" if !in_tab_stops => out.push('\t'),
                b"br" | b"cr" => out.push('\n'),
                // An empty paragraph still ends with a blank line.
                b"p" => out.push_str("\n\n"),
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_text > 0 => {
                let text = e
                    .unescape()
                    .map_err(|err| decode_error(format!("malformed XML: {err}")))?;
                out.push_str(&text);
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text = in_text.saturating_sub(1),
                b"tabs" => in_tab_stops = false,
                b"p" => out.push_str("\n\n"),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(decode_error(format!(
                    "malformed XML at position {}: {e}",
                    reader.error_position()
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(out)
}
