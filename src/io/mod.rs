//! PDF codec capability.
//!
//! The merge orchestrator never touches a PDF library directly. It talks to
//! the three traits in this module:
//!
//! - [`PdfCodec`] parses bytes into documents and hands out writers.
//! - [`PdfDocument`] exposes encryption state and page access.
//! - [`PageWriter`] accumulates pages and serializes the final document.
//!
//! [`LopdfCodec`] is the implementation used by the server.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::io::{LopdfCodec, PageWriter, PdfCodec, PdfDocument};
//!
//! # fn example(a: &[u8], b: &[u8]) -> Result<(), pdfmerge::error::CodecError> {
//! let codec = LopdfCodec::new();
//! let mut writer = codec.writer();
//! for bytes in [a, b] {
//!     let doc = codec.parse(bytes)?;
//!     println!("{} pages", doc.page_count());
//!     writer.append_pages(doc)?;
//! }
//! let merged: Vec<u8> = writer.serialize()?;
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod writer;

pub use reader::{LopdfCodec, LopdfDocument};
pub use writer::LopdfWriter;

use crate::error::CodecError;

/// A PDF library able to parse documents and build merged output.
pub trait PdfCodec {
    /// Parsed document type.
    type Document: PdfDocument;

    /// Output accumulator type.
    type Writer: PageWriter<Self::Document>;

    /// Parse a complete PDF file held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Malformed`] for structurally invalid input and
    /// [`CodecError::Encrypted`] when the library refuses to open an
    /// encrypted file.
    fn parse(&self, bytes: &[u8]) -> Result<Self::Document, CodecError>;

    /// Create an empty output accumulator.
    fn writer(&self) -> Self::Writer;
}

/// A parsed PDF document.
pub trait PdfDocument {
    /// Whether the document is still encrypted.
    fn is_encrypted(&self) -> bool;

    /// Try to decrypt the document with `password`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Encrypted`] if the password is wrong or the
    /// encryption scheme is unsupported.
    fn decrypt(&mut self, password: &str) -> Result<(), CodecError>;

    /// Number of pages in the document.
    fn page_count(&self) -> usize;
}

/// Accumulates pages from several documents into one output file.
pub trait PageWriter<D> {
    /// Append every page of `document`, in order, and return how many were added.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Malformed`] if the document's page tree cannot be
    /// imported.
    fn append_pages(&mut self, document: D) -> Result<usize, CodecError>;

    /// Serialize the accumulated pages into a PDF file.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Write`] if nothing was appended or writing fails.
    fn serialize(self) -> Result<Vec<u8>, CodecError>;
}
