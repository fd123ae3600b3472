//! PDF merge orchestration.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::merge::{merge_uploads, UploadItem};
//!
//! # fn example(bytes: Vec<u8>) -> Result<(), pdfmerge::error::MergeError> {
//! let result = merge_uploads(vec![UploadItem::new("a.pdf", bytes)], None)?;
//! println!("{} pages -> {}", result.page_count, result.output_filename);
//! # Ok(())
//! # }
//! ```

pub mod merger;

pub use merger::{MergeResult, Merger, UploadItem};

use crate::error::MergeError;

/// Merge uploads with the default `lopdf` codec.
///
/// Convenience wrapper around [`Merger::merge`].
///
/// # Errors
///
/// See [`Merger::merge`].
pub fn merge_uploads(
    uploads: Vec<UploadItem>,
    requested_output_name: Option<&str>,
) -> Result<MergeResult, MergeError> {
    Merger::new().merge(uploads, requested_output_name)
}
