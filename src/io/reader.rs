//! Parsing uploaded bytes with `lopdf`.

use lopdf::{Document, Object};

use crate::error::CodecError;
use crate::io::{LopdfWriter, PdfCodec, PdfDocument};

/// The `lopdf`-backed codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfCodec;

impl LopdfCodec {
    /// Create a new codec.
    pub fn new() -> Self {
        Self
    }
}

impl PdfCodec for LopdfCodec {
    type Document = LopdfDocument;
    type Writer = LopdfWriter;

    fn parse(&self, bytes: &[u8]) -> Result<LopdfDocument, CodecError> {
        let mut inner = Document::load_mem(bytes).map_err(classify_load_error)?;
        strip_load_time_encryption(&mut inner);
        Ok(LopdfDocument { inner })
    }

    fn writer(&self) -> LopdfWriter {
        LopdfWriter::new()
    }
}

/// A document parsed by [`LopdfCodec`].
#[derive(Debug, Clone)]
pub struct LopdfDocument {
    inner: Document,
}

impl LopdfDocument {
    #[cfg(test)]
    pub(crate) fn document(&self) -> &Document {
        &self.inner
    }

    pub(crate) fn into_inner(self) -> Document {
        self.inner
    }
}

impl PdfDocument for LopdfDocument {
    fn is_encrypted(&self) -> bool {
        self.inner.is_encrypted()
    }

    fn decrypt(&mut self, password: &str) -> Result<(), CodecError> {
        self.inner
            .decrypt(password)
            .map_err(|e| CodecError::Encrypted(e.to_string()))
    }

    fn page_count(&self) -> usize {
        self.inner.get_pages().len()
    }
}

/// `load_mem` already opens encrypted files whose user password is empty:
/// objects come back decrypted and `encryption_state` is set, but the
/// `/Encrypt` trailer entry stays behind. Dropping it marks the document as
/// plain so it is never decrypted a second time.
fn strip_load_time_encryption(doc: &mut Document) {
    if doc.encryption_state.is_none() {
        return;
    }

    if let Some(Object::Reference(encrypt_id)) = doc.trailer.remove(b"Encrypt") {
        doc.objects.remove(&encrypt_id);
    }
}

/// Targets `lopdf::Error::Decryption` and `lopdf::Error::UnsupportedSecurityHandler`;
/// every other load failure means the bytes are not a usable PDF.
fn classify_load_error(err: lopdf::Error) -> CodecError {
    match err {
        lopdf::Error::Decryption(_) | lopdf::Error::UnsupportedSecurityHandler(_) => {
            CodecError::Encrypted(err.to_string())
        }
        other => CodecError::Malformed(other.to_string()),
    }
}
