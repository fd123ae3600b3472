//! pdfmerge - a small web service that merges uploaded PDF files.
//!
//! Users pick one or more PDFs on a form; the server concatenates their pages
//! in submission order and returns a single downloadable document. Rejected
//! uploads come back to the form as a (Chinese) flash message.
//!
//! The merge core ([`merge`]) is synchronous and free of HTTP concerns; it
//! talks to the PDF library only through the codec traits in [`io`].

pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod merge;
pub mod server;
pub mod utils;

pub use error::*;

use crate::cli::Cli;

/// Crate version, reported by `/health`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Service name, reported by `/health`.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Resolve configuration from `cli`, install logging and serve until shutdown.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the listener cannot be
/// bound or the server fails while running.
pub async fn run(cli: Cli) -> Result<()> {
    logging::init(cli.verbose);

    let config = cli.to_config()?;
    tracing::info!("Starting {} v{}", NAME, VERSION);
    tracing::debug!(?config, "Resolved configuration");

    server::serve(&config).await
}
