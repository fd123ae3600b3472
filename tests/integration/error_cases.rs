//! Integration tests for rejected merges.

use pdfmerge::error::MergeError;
use pdfmerge::merge::{UploadItem, merge_uploads};

use crate::common::pdf_with_pages;

#[test]
fn test_no_uploads() {
    assert_eq!(merge_uploads(vec![], None).unwrap_err(), MergeError::EmptySelection);
}

#[test]
fn test_only_blank_slot() {
    let err = merge_uploads(vec![UploadItem::new("", Vec::new())], None).unwrap_err();
    assert_eq!(err, MergeError::EmptySelection);
}

#[test]
fn test_unsupported_type_halts_processing() {
    let uploads = vec![
        UploadItem::new("a.pdf", pdf_with_pages("A", 1)),
        UploadItem::new("notes.txt", b"hello".to_vec()),
        UploadItem::new("empty.pdf", Vec::new()),
    ];

    let err = merge_uploads(uploads, None).unwrap_err();
    assert_eq!(err, MergeError::unsupported_type("notes.txt"));
    assert_eq!(
        err.user_message(),
        "不支持的文件类型：notes.txt（仅支持 .pdf）"
    );
}

#[test]
fn test_empty_file() {
    let err = merge_uploads(vec![UploadItem::new("a.pdf", Vec::new())], None).unwrap_err();
    assert_eq!(err, MergeError::empty_file("a.pdf"));
}

#[test]
fn test_random_bytes_are_invalid_pdf() {
    let garbage: Vec<u8> = (0..2048u32).map(|i| (i * 31 % 251) as u8).collect();
    let err = merge_uploads(vec![UploadItem::new("junk.pdf", garbage)], None).unwrap_err();
    assert_eq!(err, MergeError::invalid_pdf("junk.pdf"));
    assert_eq!(err.user_message(), "读取失败：junk.pdf 可能不是有效 PDF。");
}

#[test]
fn test_truncated_pdf_is_invalid() {
    let mut pdf = pdf_with_pages("A", 2);
    pdf.truncate(32);

    let err = merge_uploads(vec![UploadItem::new("cut.pdf", pdf)], None).unwrap_err();
    assert!(matches!(err, MergeError::InvalidPdf { .. }));
}

#[test]
fn test_error_uses_sanitized_filename() {
    let err = merge_uploads(
        vec![UploadItem::new("../uploads/My Notes.docx", b"x".to_vec())],
        None,
    )
    .unwrap_err();
    assert_eq!(err.filename(), Some("uploads_My_Notes.docx"));
}
