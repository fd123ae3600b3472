//! Integration tests for successful merges.

use pdfmerge::merge::{Merger, UploadItem, merge_uploads};
use rstest::rstest;

use crate::common::{page_texts, pdf_with_pages};

#[test]
fn test_merge_two_single_page_pdfs_in_order() {
    let uploads = vec![
        UploadItem::new("A.pdf", pdf_with_pages("A", 1)),
        UploadItem::new("B.pdf", pdf_with_pages("B", 1)),
    ];

    let result = merge_uploads(uploads, None).unwrap();
    assert_eq!(result.page_count, 2);
    assert_eq!(result.files_merged, 2);
    assert_eq!(result.output_filename, "merged.pdf");

    let texts = page_texts(&result.output_bytes);
    assert_eq!(texts.len(), 2);
    assert!(texts[0].contains("A-Page-1"));
    assert!(texts[1].contains("B-Page-1"));
}

#[test]
fn test_page_count_is_sum_of_inputs() {
    let uploads = vec![
        UploadItem::new("first.pdf", pdf_with_pages("X", 3)),
        UploadItem::new("second.PDF", pdf_with_pages("Y", 2)),
        UploadItem::new("third.pdf", pdf_with_pages("Z", 4)),
    ];

    let result = Merger::new().merge(uploads, Some("Report")).unwrap();
    assert_eq!(result.page_count, 9);
    assert_eq!(result.output_filename, "Report.pdf");

    let texts = page_texts(&result.output_bytes);
    let expected = [
        "X-Page-1", "X-Page-2", "X-Page-3", "Y-Page-1", "Y-Page-2", "Z-Page-1", "Z-Page-2",
        "Z-Page-3", "Z-Page-4",
    ];
    for (text, label) in texts.iter().zip(expected) {
        assert!(text.contains(label), "expected {label} in {text:?}");
    }
}

#[test]
fn test_same_file_twice() {
    let pdf = pdf_with_pages("S", 2);
    let uploads = vec![
        UploadItem::new("s.pdf", pdf.clone()),
        UploadItem::new("s.pdf", pdf),
    ];

    let result = merge_uploads(uploads, None).unwrap();
    assert_eq!(result.page_count, 4);
    assert_eq!(page_texts(&result.output_bytes).len(), 4);
}

#[test]
fn test_blank_slots_are_skipped() {
    let uploads = vec![
        UploadItem::new("", Vec::new()),
        UploadItem::new("only.pdf", pdf_with_pages("O", 1)),
        UploadItem::new("", Vec::new()),
    ];

    let result = merge_uploads(uploads, None).unwrap();
    assert_eq!(result.page_count, 1);
    assert_eq!(result.files_merged, 1);
}

#[test]
fn test_merge_is_deterministic() {
    let build = || {
        vec![
            UploadItem::new("a.pdf", pdf_with_pages("A", 2)),
            UploadItem::new("b.pdf", pdf_with_pages("B", 1)),
        ]
    };

    let first = merge_uploads(build(), None).unwrap();
    let second = merge_uploads(build(), None).unwrap();
    assert_eq!(first.page_count, second.page_count);
    assert_eq!(
        page_texts(&first.output_bytes),
        page_texts(&second.output_bytes)
    );
}

#[rstest]
#[case(None, "merged.pdf")]
#[case(Some(""), "merged.pdf")]
#[case(Some("   "), "merged.pdf")]
#[case(Some("Report"), "Report.pdf")]
#[case(Some("report.pdf"), "report.pdf")]
#[case(Some("Q3 summary.PDF"), "Q3_summary.PDF")]
#[case(Some("../../secret"), "secret.pdf")]
#[case(Some("合并"), "merged.pdf")]
fn test_output_naming(#[case] requested: Option<&str>, #[case] expected: &str) {
    let uploads = vec![UploadItem::new("a.pdf", pdf_with_pages("A", 1))];
    let result = merge_uploads(uploads, requested).unwrap();
    assert_eq!(result.output_filename, expected);
}
