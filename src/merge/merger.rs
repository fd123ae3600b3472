//! Core merge orchestration.
//!
//! Validates each upload, drives the codec and accumulates pages into a
//! single output document. Processing stops at the first offending upload
//! and the partially built writer is dropped.

use tracing::{debug, info};

use crate::error::MergeError;
use crate::io::{LopdfCodec, PageWriter, PdfCodec, PdfDocument};
use crate::utils::{format_file_size, has_pdf_extension, output_filename, secure_filename};

/// One file part from a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadItem {
    /// Filename as sent by the client. Empty for unused picker slots.
    pub filename: String,

    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl UploadItem {
    /// Create an upload item.
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    /// Whether this slot had no file selected.
    pub fn is_unselected(&self) -> bool {
        self.filename.is_empty()
    }
}

/// Result of a successful merge.
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// Serialized merged PDF.
    pub output_bytes: Vec<u8>,

    /// Total number of pages in the merged document.
    pub page_count: usize,

    /// Sanitized download filename, always ending in `.pdf`.
    pub output_filename: String,

    /// Number of uploads that contributed to the output.
    pub files_merged: usize,
}

/// Merges uploaded PDFs using an injected codec.
#[derive(Debug, Clone, Default)]
pub struct Merger<C = LopdfCodec> {
    codec: C,
}

impl Merger<LopdfCodec> {
    /// Create a merger backed by `lopdf`.
    pub fn new() -> Self {
        Self::with_codec(LopdfCodec::new())
    }
}

impl<C: PdfCodec> Merger<C> {
    /// Create a merger backed by `codec`.
    pub fn with_codec(codec: C) -> Self {
        Self { codec }
    }

    /// Merge `uploads`, in order, into a single PDF.
    ///
    /// Empty picker slots are skipped. Each remaining upload must have a
    /// `.pdf` name, non-empty content and parse as a PDF; encrypted files are
    /// opened with the empty password only.
    ///
    /// # Errors
    ///
    /// Returns the [`MergeError`] for the first upload that fails
    /// validation, [`MergeError::EmptySelection`] if no file was selected and
    /// [`MergeError::NoPagesMerged`] if the accepted documents have no pages.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pdfmerge::merge::{Merger, UploadItem};
    ///
    /// # fn example(a: Vec<u8>, b: Vec<u8>) -> Result<(), pdfmerge::error::MergeError> {
    /// let merger = Merger::new();
    /// let result = merger.merge(
    ///     vec![UploadItem::new("a.pdf", a), UploadItem::new("b.pdf", b)],
    ///     Some("Report"),
    /// )?;
    /// assert_eq!(result.output_filename, "Report.pdf");
    /// # Ok(())
    /// # }
    /// ```
    pub fn merge(
        &self,
        uploads: Vec<UploadItem>,
        requested_output_name: Option<&str>,
    ) -> Result<MergeResult, MergeError> {
        if uploads.iter().all(UploadItem::is_unselected) {
            return Err(MergeError::EmptySelection);
        }

        let mut writer = self.codec.writer();
        let mut page_count = 0;
        let mut files_merged = 0;

        for (slot, upload) in uploads.into_iter().enumerate() {
            if upload.is_unselected() {
                debug!(slot, "Skipping empty upload slot");
                continue;
            }

            let filename = secure_filename(&upload.filename);
            if !has_pdf_extension(&filename) {
                return Err(MergeError::unsupported_type(filename));
            }

            if upload.bytes.is_empty() {
                return Err(MergeError::empty_file(filename));
            }

            let mut document = self.codec.parse(&upload.bytes).map_err(|err| {
                debug!(%filename, error = %err, "Failed to parse upload");
                if err.is_encryption() {
                    MergeError::encrypted_unreadable(&filename)
                } else {
                    MergeError::invalid_pdf(&filename)
                }
            })?;

            // Only the empty password is ever tried
            if document.is_encrypted() {
                document
                    .decrypt("")
                    .map_err(|_| MergeError::encrypted_unreadable(&filename))?;
            }

            let appended = writer.append_pages(document).map_err(|err| {
                debug!(%filename, error = %err, "Failed to import pages");
                MergeError::invalid_pdf(&filename)
            })?;

            debug!(
                %filename,
                size = %format_file_size(upload.bytes.len() as u64),
                pages = appended,
                "Accepted upload"
            );
            page_count += appended;
            files_merged += 1;
        }

        if page_count == 0 {
            return Err(MergeError::NoPagesMerged);
        }

        let output_bytes = writer
            .serialize()
            .map_err(|err| MergeError::output_failed(err.to_string()))?;

        let output_filename = output_filename(requested_output_name);

        info!(
            files = files_merged,
            pages = page_count,
            size = %format_file_size(output_bytes.len() as u64),
            output = %output_filename,
            "Merged PDF"
        );

        Ok(MergeResult {
            output_bytes,
            page_count,
            output_filename,
            files_merged,
        })
    }
}
