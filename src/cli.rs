//! Command-line and environment parsing for the pdfmerge server.
//!
//! Every flag can also be supplied through an environment variable, so the
//! server can be configured the same way in a container or a `.env` file.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::cli::Cli;
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! let config = cli.to_config().expect("Invalid configuration");
//! println!("Listening on {}", config.port);
//! ```

use clap::Parser;
use tracing::warn;

use crate::config::{Config, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SECRET_KEY, parse_max_content_length};
use crate::error::{PdfMergeError, Result};

/// Serve a web form that merges uploaded PDF files into one download.
#[derive(Parser, Debug)]
#[command(name = "pdfmerge")]
#[command(version)]
#[command(about = "Serve a web form that merges uploaded PDF files", long_about = None)]
#[command(author)]
pub struct Cli {
    /// IP address to bind to
    #[arg(long, env = "HOST", value_name = "ADDR", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", value_name = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Key used to sign flash-message cookies
    ///
    /// Falls back to a development key when unset; always set this in production.
    #[arg(long, env = "SECRET_KEY", value_name = "KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// Maximum upload size in bytes
    ///
    /// Only plain digit strings are honoured; any other value is ignored and
    /// uploads are left unlimited.
    #[arg(long, env = "MAX_CONTENT_LENGTH", value_name = "BYTES")]
    pub max_content_length: Option<String>,

    /// Verbose output - log every request and upload at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Convert CLI arguments into a validated [`Config`].
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting configuration fails validation.
    pub fn to_config(&self) -> Result<Config> {
        let secret_key = self
            .secret_key
            .clone()
            .unwrap_or_else(|| DEFAULT_SECRET_KEY.to_string());

        let max_content_length = match self.max_content_length.as_deref() {
            None => None,
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => {
                let parsed = parse_max_content_length(raw);
                if parsed.is_none() {
                    warn!(value = raw, "Ignoring non-numeric maximum content length");
                }
                parsed
            }
        };

        let config = Config {
            host: self.host.clone(),
            port: self.port,
            secret_key,
            max_content_length,
            verbose: self.verbose,
        };

        config.validate().map_err(|e| {
            PdfMergeError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }
}
