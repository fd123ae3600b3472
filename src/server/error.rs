//! HTTP-only failures.
//!
//! Merge rejections never reach this type; they become flash messages.

use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ServerError {
    /// The multipart body could not be read: malformed, or over the size limit.
    #[error("Invalid upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: &'static str,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ServerError::Multipart(err) => {
                let status = err.status();
                let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    "PAYLOAD_TOO_LARGE"
                } else {
                    "INVALID_UPLOAD"
                };
                (status, code, err.body_text())
            }
            ServerError::Internal(msg) => {
                error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    msg.clone(),
                )
            }
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code,
        };

        (status, Json(body)).into_response()
    }
}
