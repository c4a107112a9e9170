//! Bulk upload archives: ZIP and tar.gz expansion, entry filtering, the
//! total size cap, and parsing the extracted entries.

mod common;

use cvscan_ingest::{ArchiveError, CvParser, DEFAULT_MAX_ARCHIVE_SIZE, extract_archive};

use common::{FixedPdf, docx_bytes, tar_gz_bytes, zip_bytes};

fn filenames(contents: &cvscan_ingest::ArchiveContents) -> Vec<&str> {
    contents.entries.iter().map(|e| e.filename.as_str()).collect()
}

#[test]
fn zip_keeps_only_cv_files() {
    let docx = docx_bytes(&["Võ Thị Sáu", "Email: sau.vo@gmail.com"]);
    let data = zip_bytes(&[
        ("cvs/", b"".as_slice()),
        ("cvs/an.txt", "Nguyễn Văn An\nan@fpt.vn".as_bytes()),
        ("cvs/sau.docx", docx.as_slice()),
        ("cvs/khoa.pdf", b"%PDF-1.4 fake".as_slice()),
        ("cvs/fake.pdf", b"<html>not a pdf</html>".as_slice()),
        ("cvs/photo.png", b"\x89PNG".as_slice()),
        ("cvs/.hidden.txt", b"secret".as_slice()),
        ("__MACOSX/cvs/._an.txt", b"resource fork".as_slice()),
        ("../escape.txt", b"outside".as_slice()),
    ]);

    let contents = extract_archive("batch.zip", &data, DEFAULT_MAX_ARCHIVE_SIZE).unwrap();
    assert_eq!(filenames(&contents), vec!["an.txt", "sau.docx", "khoa.pdf"]);
    assert_eq!(contents.entries[0].path, "cvs/an.txt");
    assert!(contents.warnings.is_empty());
}

#[test]
fn extracted_entries_parse() {
    let docx = docx_bytes(&["Võ Thị Sáu", "Email: sau.vo@gmail.com"]);
    let data = zip_bytes(&[
        ("an.txt", "Nguyễn Văn An\nan@fpt.vn".as_bytes()),
        ("sau.docx", docx.as_slice()),
        ("khoa.pdf", b"%PDF-1.4".as_slice()),
    ]);
    let contents = extract_archive("batch.zip", &data, 0).unwrap();

    let parser = CvParser::new().with_pdf_backend(FixedPdf(vec![vec!["khoa@vng.com.vn"]]));
    let emails: Vec<Option<String>> = contents
        .entries
        .into_iter()
        .map(|entry| parser.parse_cv(&entry.into_uploaded_file()).unwrap().email)
        .collect();

    assert_eq!(
        emails,
        vec![
            Some("an@fpt.vn".to_string()),
            Some("sau.vo@gmail.com".to_string()),
            Some("khoa@vng.com.vn".to_string()),
        ]
    );
}

#[test]
fn tar_gz_keeps_only_cv_files() {
    let data = tar_gz_bytes(&[
        ("batch/a.txt", b"Tran Van B".as_slice()),
        ("batch/b.pdf", b"MZ not a pdf".as_slice()),
        ("batch/c.docx", docx_bytes(&["x"]).as_slice()),
        ("batch/.d.txt", b"hidden".as_slice()),
        ("batch/notes.md", b"# notes".as_slice()),
    ]);

    let contents = extract_archive("batch.tar.gz", &data, 0).unwrap();
    assert_eq!(filenames(&contents), vec!["a.txt", "c.docx"]);
}

#[test]
fn archive_type_detected_from_magic_bytes() {
    let zip = zip_bytes(&[("cv.txt", b"hello".as_slice())]);
    assert_eq!(filenames(&extract_archive("upload.bin", &zip, 0).unwrap()), vec!["cv.txt"]);

    let tgz = tar_gz_bytes(&[("cv.txt", b"hello".as_slice())]);
    assert_eq!(filenames(&extract_archive("upload.bin", &tgz, 0).unwrap()), vec!["cv.txt"]);
}

#[test]
fn size_cap_stops_extraction_with_warning() {
    let chunk = vec![b'a'; 1000];
    let data = zip_bytes(&[
        ("1.txt", chunk.as_slice()),
        ("2.txt", chunk.as_slice()),
        ("3.txt", chunk.as_slice()),
    ]);

    let contents = extract_archive("batch.zip", &data, 2500).unwrap();
    assert_eq!(filenames(&contents), vec!["1.txt", "2.txt"]);
    assert_eq!(contents.warnings.len(), 1);
    assert!(contents.warnings[0].contains("after 2 files"));

    let unlimited = extract_archive("batch.zip", &data, 0).unwrap();
    assert_eq!(unlimited.entries.len(), 3);
}

#[test]
fn archive_without_cvs_is_an_error() {
    let data = zip_bytes(&[("readme.md", b"nothing here".as_slice())]);
    let err = extract_archive("batch.zip", &data, 0).unwrap_err();
    assert!(matches!(err, ArchiveError::NoDocuments));
}

#[test]
fn corrupt_zip_is_an_error() {
    let err = extract_archive("batch.zip", b"PK\x03\x04 truncated", 0).unwrap_err();
    assert!(matches!(err, ArchiveError::Open { kind: "ZIP", .. }));
}

#[test]
fn double_dots_inside_a_file_name_are_kept() {
    let data = tar_gz_bytes(&[
        ("batch/cv..final.txt", b"Tran Van B".as_slice()),
        ("batch/cv.v2..txt", b"Le Thi C".as_slice()),
    ]);
    let contents = extract_archive("batch.tar.gz", &data, 0).unwrap();
    assert_eq!(filenames(&contents), vec!["cv..final.txt", "cv.v2..txt"]);

    let zip = zip_bytes(&[("batch/cv..final.txt", b"Tran Van B".as_slice())]);
    let contents = extract_archive("batch.zip", &zip, 0).unwrap();
    assert_eq!(filenames(&contents), vec!["cv..final.txt"]);
}
