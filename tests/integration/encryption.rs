//! Integration tests for encrypted uploads.

use pdfmerge::error::MergeError;
use pdfmerge::merge::{UploadItem, merge_uploads};
use rstest::rstest;

use crate::common::{Cipher, encrypted_pdf_with_pages, page_texts, pdf_with_pages};

#[rstest]
#[case::rc4(Cipher::Rc4)]
#[case::aes128(Cipher::Aes128)]
fn test_empty_password_pdf_merges_readably(#[case] cipher: Cipher) {
    let uploads = vec![
        UploadItem::new("plain.pdf", pdf_with_pages("P", 1)),
        UploadItem::new("open.pdf", encrypted_pdf_with_pages("E", 2, cipher, "")),
    ];

    let result = merge_uploads(uploads, None).unwrap();
    assert_eq!(result.page_count, 3);

    let texts = page_texts(&result.output_bytes);
    assert_eq!(texts.len(), 3);
    assert!(texts[0].contains("P-Page-1"));
    assert!(texts[1].contains("E-Page-1"), "unreadable page: {:?}", texts[1]);
    assert!(texts[2].contains("E-Page-2"), "unreadable page: {:?}", texts[2]);
}

#[rstest]
#[case::rc4(Cipher::Rc4)]
#[case::aes128(Cipher::Aes128)]
fn test_merged_output_is_not_encrypted(#[case] cipher: Cipher) {
    let uploads = vec![UploadItem::new(
        "open.pdf",
        encrypted_pdf_with_pages("E", 1, cipher, ""),
    )];

    let result = merge_uploads(uploads, None).unwrap();
    let merged = lopdf::Document::load_mem(&result.output_bytes).unwrap();
    assert!(!merged.is_encrypted());
}

#[rstest]
#[case::rc4(Cipher::Rc4)]
#[case::aes128(Cipher::Aes128)]
fn test_password_protected_pdf_is_rejected(#[case] cipher: Cipher) {
    let uploads = vec![
        UploadItem::new("a.pdf", pdf_with_pages("A", 1)),
        UploadItem::new("locked.pdf", encrypted_pdf_with_pages("L", 1, cipher, "secret")),
    ];

    let err = merge_uploads(uploads, None).unwrap_err();
    assert_eq!(err, MergeError::encrypted_unreadable("locked.pdf"));
    assert_eq!(err.user_message(), "无法读取加密 PDF：locked.pdf（需要密码）");
}
