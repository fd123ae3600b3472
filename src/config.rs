//! Server configuration.
//!
//! Settings are resolved once at startup (see [`crate::cli::Cli`]) into an
//! immutable [`Config`] that is handed to the HTTP layer. The merge core
//! takes no configuration.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::error::{PdfMergeError, Result};

/// Secret used when none is configured. Fine for development only.
pub const DEFAULT_SECRET_KEY: &str = "dev-secret-key";

/// Default listening port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Validated, normalized server configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// IP address to bind to.
    pub host: String,

    /// Port to listen on.
    pub port: u16,

    /// Key used to sign flash-message cookies.
    pub secret_key: String,

    /// Maximum request body size in bytes; `None` means unlimited.
    pub max_content_length: Option<usize>,

    /// Enable debug-level logging.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            max_content_length: None,
            verbose: false,
        }
    }
}

// Keeps the secret out of logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secret_key", &"<redacted>")
            .field("max_content_length", &self.max_content_length)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl Config {
    /// Address the server should listen on.
    ///
    /// # Errors
    ///
    /// Returns an error if `host` is not an IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.host.trim().parse().map_err(|_| {
            PdfMergeError::invalid_config(format!(
                "Invalid host: {}. Must be an IPv4 or IPv6 address",
                self.host
            ))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Whether the built-in development secret is in use.
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is not an IP address, the secret key is
    /// empty or the upload limit is zero.
    pub fn validate(&self) -> Result<()> {
        self.socket_addr()?;

        if self.secret_key.is_empty() {
            return Err(PdfMergeError::invalid_config("Secret key must not be empty"));
        }

        if self.max_content_length == Some(0) {
            return Err(PdfMergeError::invalid_config(
                "Maximum content length must be at least 1 byte",
            ));
        }

        Ok(())
    }
}

/// Parse an upload limit given as a plain string of digits.
///
/// Surrounding whitespace is ignored. Anything else (signs, units, empty
/// strings, values that overflow) yields `None`.
pub fn parse_max_content_length(raw: &str) -> Option<usize> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
