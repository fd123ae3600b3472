//! Error types for pdfmerge.
//!
//! Three layers of errors exist:
//!
//! - [`MergeError`]: a rejected merge request. Every variant is recoverable
//!   and carries a user-facing message shown on the upload form.
//! - [`CodecError`]: what the PDF codec reports at its boundary. The merge
//!   orchestrator translates it into a [`MergeError`].
//! - [`PdfMergeError`]: process-level failures (configuration, binding the
//!   listener) that terminate the server with an exit code.

use std::io;
use std::net::SocketAddr;

/// Result type alias for process-level pdfmerge operations.
pub type Result<T> = std::result::Result<T, PdfMergeError>;

/// Why a merge request was rejected.
///
/// Only one error is ever reported per request: processing stops at the
/// first offending upload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// No upload slot contained a file.
    #[error("No PDF files were selected")]
    EmptySelection,

    /// The sanitized filename does not end in `.pdf`.
    #[error("Unsupported file type: {filename}")]
    UnsupportedType {
        /// Sanitized name of the rejected upload.
        filename: String,
    },

    /// The upload contained zero bytes.
    #[error("Uploaded file is empty: {filename}")]
    EmptyFile {
        /// Sanitized name of the rejected upload.
        filename: String,
    },

    /// The document is encrypted and the empty password did not open it.
    #[error("Encrypted PDF requires a password: {filename}")]
    EncryptedUnreadable {
        /// Sanitized name of the rejected upload.
        filename: String,
    },

    /// The bytes could not be read as a PDF document.
    #[error("Failed to read PDF: {filename}")]
    InvalidPdf {
        /// Sanitized name of the rejected upload.
        filename: String,
    },

    /// Every accepted document was empty.
    #[error("No pages to merge")]
    NoPagesMerged,

    /// The merged document could not be serialized.
    #[error("Failed to write merged PDF: {reason}")]
    OutputFailed {
        /// Codec-provided description.
        reason: String,
    },
}

impl MergeError {
    /// Create an UnsupportedType error.
    pub fn unsupported_type(filename: impl Into<String>) -> Self {
        Self::UnsupportedType {
            filename: filename.into(),
        }
    }

    /// Create an EmptyFile error.
    pub fn empty_file(filename: impl Into<String>) -> Self {
        Self::EmptyFile {
            filename: filename.into(),
        }
    }

    /// Create an EncryptedUnreadable error.
    pub fn encrypted_unreadable(filename: impl Into<String>) -> Self {
        Self::EncryptedUnreadable {
            filename: filename.into(),
        }
    }

    /// Create an InvalidPdf error.
    pub fn invalid_pdf(filename: impl Into<String>) -> Self {
        Self::InvalidPdf {
            filename: filename.into(),
        }
    }

    /// Create an OutputFailed error.
    pub fn output_failed(reason: impl Into<String>) -> Self {
        Self::OutputFailed {
            reason: reason.into(),
        }
    }

    /// Name of the upload that caused the rejection, if a single file did.
    pub fn filename(&self) -> Option<&str> {
        match self {
            Self::UnsupportedType { filename }
            | Self::EmptyFile { filename }
            | Self::EncryptedUnreadable { filename }
            | Self::InvalidPdf { filename } => Some(filename),
            Self::EmptySelection | Self::NoPagesMerged | Self::OutputFailed { .. } => None,
        }
    }

    /// Message shown to the user on the upload form.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptySelection => "请先选择至少一个 PDF 文件。".to_string(),
            Self::UnsupportedType { filename } => {
                format!("不支持的文件类型：{filename}（仅支持 .pdf）")
            }
            Self::EmptyFile { filename } => format!("文件为空：{filename}"),
            Self::EncryptedUnreadable { filename } => {
                format!("无法读取加密 PDF：{filename}（需要密码）")
            }
            Self::InvalidPdf { filename } => format!("读取失败：{filename} 可能不是有效 PDF。"),
            Self::NoPagesMerged => "没有可合并的页面。".to_string(),
            Self::OutputFailed { .. } => "生成合并文件失败，请稍后重试。".to_string(),
        }
    }
}

/// Failure reported by a PDF codec implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The input is not a structurally valid PDF.
    #[error("Malformed PDF: {0}")]
    Malformed(String),

    /// The input is encrypted and could not be opened.
    #[error("Encrypted PDF: {0}")]
    Encrypted(String),

    /// The output document could not be assembled or written.
    #[error("Failed to write PDF: {0}")]
    Write(String),
}

impl CodecError {
    /// Check if this error means the document needs a password.
    pub fn is_encryption(&self) -> bool {
        matches!(self, Self::Encrypted(_))
    }
}

/// Process-level error for the pdfmerge server.
#[derive(Debug, thiserror::Error)]
pub enum PdfMergeError {
    /// Configuration could not be resolved or failed validation.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// The listener could not be bound.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// Address the server tried to listen on.
        addr: SocketAddr,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Generic I/O error while serving.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl PdfMergeError {
    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidConfig { .. } => 1,
            Self::Bind { .. } => 2,
            Self::Io(_) => 5,
        }
    }
}
