use std::io::{Cursor, Read};
use std::path::{Component, Path};

use flate2::read::GzDecoder;
use tar::Archive;
use thiserror::Error;

use cvscan_core::{DocumentFormat, UploadedFile};

/// Default cap on the total uncompressed size pulled out of one archive.
pub const DEFAULT_MAX_ARCHIVE_SIZE: u64 = 50 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("failed to open {kind} archive: {message}")]
    Open { kind: &'static str, message: String },
    #[error("failed to read archive entry {name}: {message}")]
    Entry { name: String, message: String },
    #[error("unsupported archive format: {0}")]
    Unsupported(String),
    #[error("no PDF, DOCX or TXT files found in archive")]
    NoDocuments,
}

/// A CV file pulled out of an archive, held in memory.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Path inside the archive.
    pub path: String,
    /// Final path component, used as the file name.
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ArchiveEntry {
    pub fn into_uploaded_file(self) -> UploadedFile {
        UploadedFile::new(self.filename, None, self.bytes)
    }
}

/// Entries extracted from an archive plus any warnings (e.g. size limit reached).
#[derive(Debug, Default)]
pub struct ArchiveContents {
    pub entries: Vec<ArchiveEntry>,
    pub warnings: Vec<String>,
}

/// Returns true if the given file name looks like a supported archive.
pub fn is_archive_name(name: &str) -> bool {
    let name = name.to_lowercase();
    name.ends_with(".zip") || name.ends_with(".tar.gz") || name.ends_with(".tgz")
}

/// Returns true if the file content looks valid for its extension.
/// PDFs must start with `%PDF-`; DOCX and TXT are checked by their decoders.
fn passes_magic_check(name: &str, data: &[u8]) -> bool {
    match DocumentFormat::from_file_name(name) {
        Some(DocumentFormat::Pdf) => data.starts_with(b"%PDF-"),
        Some(_) => true,
        None => false,
    }
}

/// Shared per-entry filter. `None` means skip.
fn entry_filename(path: &Path) -> Option<String> {
    let name_str = path.to_string_lossy();
    if name_str.contains("__MACOSX") {
        return None;
    }
    let filename = path.file_name()?.to_string_lossy().to_string();
    if filename.starts_with('.') {
        return None;
    }
    DocumentFormat::from_file_name(&filename).map(|_| filename)
}

/// Relative paths that stay inside the extraction root. `cv..final.pdf`
/// is fine; `../cv.pdf` and `/etc/cv.pdf` are not.
fn is_safe_path(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn size_limit_warning(max_size: u64, extracted: usize) -> String {
    format!(
        "Size limit ({}MB) reached after {} files, skipping remaining",
        max_size / 1024 / 1024,
        extracted
    )
}

/// Detect the archive type and extract every CV file it contains.
///
/// Type is detected by file name first, then by magic bytes. `max_size`
/// limits total extracted bytes (0 = unlimited). When the limit is reached,
/// extraction stops and a warning is included in the result.
pub fn extract_archive(
    name: &str,
    data: &[u8],
    max_size: u64,
) -> Result<ArchiveContents, ArchiveError> {
    let lower = name.to_lowercase();

    if lower.ends_with(".zip") || data.starts_with(b"PK") {
        extract_from_zip(data, max_size)
    } else if lower.ends_with(".tar.gz") || lower.ends_with(".tgz") || data.starts_with(&[0x1f, 0x8b])
    {
        extract_from_tar_gz(data, max_size)
    } else {
        Err(ArchiveError::Unsupported(name.to_string()))
    }
}

/// Extract CV files from a ZIP archive held in memory.
pub fn extract_from_zip(data: &[u8], max_size: u64) -> Result<ArchiveContents, ArchiveError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data)).map_err(|e| ArchiveError::Open {
        kind: "ZIP",
        message: e.to_string(),
    })?;

    let mut contents = ArchiveContents::default();
    let mut total_size: u64 = 0;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i).map_err(|e| ArchiveError::Entry {
            name: format!("#{i}"),
            message: e.to_string(),
        })?;

        if file.is_dir() {
            continue;
        }
        // Skip path traversal attempts
        let Some(path) = file.enclosed_name() else {
            tracing::debug!(entry = file.name(), "skipping unsafe archive path");
            continue;
        };
        let Some(filename) = entry_filename(&path) else {
            continue;
        };

        if max_size > 0 {
            total_size += file.size();
            if total_size > max_size {
                let warning = size_limit_warning(max_size, contents.entries.len());
                tracing::warn!(max_size, "{warning}");
                contents.warnings.push(warning);
                break;
            }
        }

        let path_str = path.to_string_lossy().to_string();
        let mut buf = Vec::new();
        file.read_to_end(&mut buf).map_err(|e| ArchiveError::Entry {
            name: path_str.clone(),
            message: e.to_string(),
        })?;

        if !passes_magic_check(&filename, &buf) {
            tracing::debug!(entry = %path_str, "skipping entry that fails magic check");
            continue;
        }

        contents.entries.push(ArchiveEntry {
            path: path_str,
            filename,
            bytes: buf,
        });
    }

    finish(contents)
}

/// Extract CV files from a tar.gz archive held in memory.
pub fn extract_from_tar_gz(data: &[u8], max_size: u64) -> Result<ArchiveContents, ArchiveError> {
    let gz = GzDecoder::new(data);
    let mut archive = Archive::new(gz);

    let entries = archive.entries().map_err(|e| ArchiveError::Open {
        kind: "tar.gz",
        message: e.to_string(),
    })?;

    let mut contents = ArchiveContents::default();
    let mut total_size: u64 = 0;

    for entry in entries {
        let mut entry = entry.map_err(|e| ArchiveError::Open {
            kind: "tar.gz",
            message: e.to_string(),
        })?;

        if entry.header().entry_type().is_dir() {
            continue;
        }
        let path = entry
            .path()
            .map_err(|e| ArchiveError::Entry {
                name: "<unreadable path>".to_string(),
                message: e.to_string(),
            })?
            .to_path_buf();
        let path_str = path.to_string_lossy().to_string();

        if !is_safe_path(&path) {
            tracing::debug!(entry = %path_str, "skipping unsafe archive path");
            continue;
        }
        let Some(filename) = entry_filename(&path) else {
            continue;
        };

        if max_size > 0 {
            total_size += entry.size();
            if total_size > max_size {
                let warning = size_limit_warning(max_size, contents.entries.len());
                tracing::warn!(max_size, "{warning}");
                contents.warnings.push(warning);
                break;
            }
        }

        let mut buf = Vec::new();
        entry.read_to_end(&mut buf).map_err(|e| ArchiveError::Entry {
            name: path_str.clone(),
            message: e.to_string(),
        })?;

        if !passes_magic_check(&filename, &buf) {
            tracing::debug!(entry = %path_str, "skipping entry that fails magic check");
            continue;
        }

        contents.entries.push(ArchiveEntry {
            path: path_str,
            filename,
            bytes: buf,
        });
    }

    finish(contents)
}

fn finish(contents: ArchiveContents) -> Result<ArchiveContents, ArchiveError> {
    if contents.entries.is_empty() && contents.warnings.is_empty() {
        return Err(ArchiveError::NoDocuments);
    }
    tracing::debug!(entries = contents.entries.len(), "archive extracted");
    Ok(contents)
}
