//! Signed, single-use flash messages.
//!
//! A rejected merge redirects back to the form; the message travels in a
//! cookie holding `base64url(json) "." base64url(hmac_sha256(json))`, keyed by
//! the configured secret. Cookies that fail verification are treated as absent.

use axum::http::{HeaderMap, HeaderValue, header};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::debug;

use crate::error::{PdfMergeError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Name of the cookie carrying pending flash messages.
pub const FLASH_COOKIE: &str = "flash";

/// One message shown above the upload form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub category: String,
    pub message: String,
}

impl FlashMessage {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            category: "error".to_string(),
            message: message.into(),
        }
    }
}

/// Signs and verifies flash cookies with HMAC-SHA256.
#[derive(Clone)]
pub struct FlashSigner {
    mac: HmacSha256,
}

impl std::fmt::Debug for FlashSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlashSigner").finish_non_exhaustive()
    }
}

impl FlashSigner {
    /// Create a signer keyed by `secret`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is rejected by the MAC.
    pub fn new(secret: &str) -> Result<Self> {
        let mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| PdfMergeError::invalid_config(format!("Invalid secret key: {e}")))?;
        Ok(Self { mac })
    }

    /// Encode messages into a signed cookie value.
    pub fn sign(&self, messages: &[FlashMessage]) -> String {
        let json = serde_json::to_vec(messages).unwrap_or_else(|_| b"[]".to_vec());
        let payload = URL_SAFE_NO_PAD.encode(&json);

        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        format!("{payload}.{signature}")
    }

    /// Decode a cookie value, returning `None` unless the signature matches.
    pub fn verify(&self, value: &str) -> Option<Vec<FlashMessage>> {
        let (payload, signature) = value.split_once('.')?;
        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;

        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        if mac.verify_slice(&signature).is_err() {
            debug!("Discarding flash cookie with invalid signature");
            return None;
        }

        let json = URL_SAFE_NO_PAD.decode(payload).ok()?;
        serde_json::from_slice(&json).ok()
    }

    /// Read and verify pending messages from a request's `Cookie` headers.
    pub fn read(&self, headers: &HeaderMap) -> Vec<FlashMessage> {
        cookie_value(headers, FLASH_COOKIE)
            .and_then(|value| self.verify(value))
            .unwrap_or_default()
    }

    /// `Set-Cookie` value storing `messages`.
    pub fn set_cookie(&self, messages: &[FlashMessage]) -> HeaderValue {
        let cookie = format!(
            "{FLASH_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            self.sign(messages)
        );
        // base64url and the fixed attributes are always valid header bytes
        HeaderValue::from_str(&cookie).unwrap_or_else(|_| clear_cookie())
    }
}

/// `Set-Cookie` value that removes the flash cookie.
pub fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static("flash=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Find a cookie by name across all `Cookie` headers.
pub(crate) fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
