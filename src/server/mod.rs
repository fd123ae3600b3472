//! HTTP surface: the upload form, the merge endpoint and a health check.
//!
//! ```text
//! GET  /        upload form, shows and clears pending flash messages
//! POST /merge   multipart `pdfs` (+ optional `output_name`) -> merged PDF
//! GET  /health  liveness check
//! ```

pub mod error;
pub mod flash;
pub mod handlers;
pub mod page;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use error::ServerError;
pub use flash::{FlashMessage, FlashSigner};

use crate::config::Config;
use crate::error::{PdfMergeError, Result};
use crate::merge::Merger;
use handlers::{handle_health, handle_index, handle_merge};

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub merger: Arc<Merger>,
    pub flash: FlashSigner,
}

impl AppState {
    /// Build handler state from the startup configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret key cannot key the flash signer.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            merger: Arc::new(Merger::new()),
            flash: FlashSigner::new(&config.secret_key)?,
        })
    }
}

/// Build the application router.
///
/// `max_content_length` caps request bodies; `None` lifts the limit entirely.
pub fn router(state: AppState, max_content_length: Option<usize>) -> Router {
    let body_limit = match max_content_length {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route("/", get(handle_index))
        .route("/merge", post(handle_merge))
        .route("/health", get(handle_health))
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until interrupted.
///
/// # Errors
///
/// Returns [`PdfMergeError::Bind`] if the address cannot be bound and
/// [`PdfMergeError::Io`] if the server fails while running.
pub async fn serve(config: &Config) -> Result<()> {
    let addr = config.socket_addr()?;
    let state = AppState::from_config(config)?;
    let app = router(state, config.max_content_length);

    if config.uses_default_secret() {
        warn!("Using the built-in development secret key; set SECRET_KEY in production");
    }

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| PdfMergeError::Bind { addr, source })?;

    info!("Server listening on http://{}", addr);
    match config.max_content_length {
        Some(limit) => info!(
            "Upload limit: {}",
            crate::utils::format_file_size(limit as u64)
        ),
        None => info!("Upload limit: none"),
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
