use std::fmt;

use serde::{Deserialize, Serialize};

/// The document formats a CV can be uploaded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 3] = [Self::Pdf, Self::Docx, Self::Txt];

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Txt => "text/plain",
        }
    }

    /// Extension including the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => ".pdf",
            Self::Docx => ".docx",
            Self::Txt => ".txt",
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.mime_type().eq_ignore_ascii_case(mime))
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| lower.ends_with(f.extension()))
    }

    /// Pick the decoder for a file.
    ///
    /// Formats are tried in PDF, DOCX, TXT order; a format is selected when
    /// either the declared MIME type or the file name says so. The extension
    /// is what rescues uploads whose MIME type is empty or misreported.
    pub fn detect(name: &str, mime: Option<&str>) -> Option<Self> {
        let by_mime = mime.and_then(Self::from_mime);
        let by_name = Self::from_file_name(name);
        Self::ALL
            .into_iter()
            .find(|f| by_mime == Some(*f) || by_name == Some(*f))
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
            Self::Txt => "TXT",
        };
        f.write_str(label)
    }
}
