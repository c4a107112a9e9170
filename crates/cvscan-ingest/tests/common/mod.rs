//! In-memory fixtures shared by the ingest integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};

use flate2::Compression;
use flate2::write::GzEncoder;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use cvscan_core::{BackendError, PdfBackend};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

/// A minimal DOCX with one single-run paragraph per item. Items must not
/// contain XML special characters.
pub fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
    );
    for p in paragraphs {
        xml.push_str(&format!(
            r#"<w:p><w:r><w:t xml:space="preserve">{p}</w:t></w:r></w:p>"#
        ));
    }
    xml.push_str("</w:body></w:document>");

    zip_bytes(&[
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("word/document.xml", xml.as_bytes()),
    ])
}

/// A ZIP archive with the given entries, in order. Names ending in `/`
/// become directory entries.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, data) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options).unwrap();
        } else {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data).unwrap();
        }
    }
    zip.finish().unwrap().into_inner()
}

/// A gzip-compressed tar archive with the given regular-file entries.
pub fn tar_gz_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        builder.append_data(&mut header, name, *data).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

/// A PDF backend that returns fixed page tokens for any input.
pub struct FixedPdf(pub Vec<Vec<&'static str>>);

impl PdfBackend for FixedPdf {
    fn extract_page_tokens(&self, _data: &[u8]) -> Result<Vec<Vec<String>>, BackendError> {
        Ok(self
            .0
            .iter()
            .map(|page| page.iter().map(|t| t.to_string()).collect())
            .collect())
    }
}

/// A PDF backend that cannot open anything.
pub struct UnreadablePdf;

impl PdfBackend for UnreadablePdf {
    fn extract_page_tokens(&self, _data: &[u8]) -> Result<Vec<Vec<String>>, BackendError> {
        Err(BackendError::OpenError("cannot find xref table".into()))
    }
}
