//! Request handlers.

use std::time::Instant;

use axum::{
    Json,
    extract::{Multipart, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::AppState;
use super::error::ServerError;
use super::flash::{FLASH_COOKIE, FlashMessage, clear_cookie, cookie_value};
use super::page::render_index;
use crate::error::MergeError;
use crate::merge::{MergeResult, UploadItem};

/// Multipart field holding the uploaded files.
pub const FILES_FIELD: &str = "pdfs";

/// Multipart field holding the requested download name.
pub const OUTPUT_NAME_FIELD: &str = "output_name";

/// `GET /` - the upload form, with any pending flash messages.
pub async fn handle_index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let flashes = state.flash.read(&headers);
    let page = Html(render_index(&flashes));

    if cookie_value(&headers, FLASH_COOKIE).is_some() {
        ([(header::SET_COOKIE, clear_cookie())], page).into_response()
    } else {
        page.into_response()
    }
}

/// `POST /merge` - merge the uploaded files and return the result.
pub async fn handle_merge(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, ServerError> {
    let started = Instant::now();
    let mut uploads = Vec::new();
    let mut output_name: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(FILES_FIELD) => {
                let filename = field.file_name().unwrap_or_default().to_owned();
                let bytes = field.bytes().await?;
                uploads.push(UploadItem::new(filename, bytes.to_vec()));
            }
            Some(OUTPUT_NAME_FIELD) => output_name = Some(field.text().await?),
            other => debug!(field = ?other, "Ignoring unknown form field"),
        }
    }

    let merger = state.merger.clone();
    let outcome =
        tokio::task::spawn_blocking(move || merger.merge(uploads, output_name.as_deref()))
            .await
            .map_err(|e| ServerError::Internal(format!("merge task failed: {e}")))?;

    match outcome {
        Ok(result) => {
            info!(
                files = result.files_merged,
                pages = result.page_count,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Serving merged PDF"
            );
            pdf_response(result)
        }
        Err(err) => {
            warn!(
                error = %err,
                file = err.filename().unwrap_or("-"),
                "Rejected merge request"
            );
            Ok(flash_redirect(&state, &err))
        }
    }
}

/// Redirect back to the form, carrying the error as a flash message.
fn flash_redirect(state: &AppState, err: &MergeError) -> Response {
    let cookie = state
        .flash
        .set_cookie(&[FlashMessage::error(err.user_message())]);

    let mut response = Redirect::to("/").into_response();
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    response
}

/// Attachment response for a merged document; never cached.
fn pdf_response(result: MergeResult) -> Result<Response, ServerError> {
    let disposition = format!("attachment; filename=\"{}\"", result.output_filename);
    let disposition = HeaderValue::from_str(&disposition)
        .map_err(|e| ServerError::Internal(format!("invalid download name: {e}")))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
            (
                header::CACHE_CONTROL,
                HeaderValue::from_static("no-cache, max-age=0"),
            ),
        ],
        result.output_bytes,
    )
        .into_response())
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

/// `GET /health`
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: crate::NAME,
        version: crate::VERSION,
    })
}
