//! One-shot status messages carried across the post/redirect/get cycle in a
//! signed cookie.
//!
//! Cookie value layout: `base64url(category ":" message) "." hex(hmac_sha256)`.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

pub const COOKIE_NAME: &str = "flash";

/// `Set-Cookie` value that expires the flash cookie in the browser.
pub const CLEAR_COOKIE: &str = "flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Success,
    Error,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Success => "success",
            Category::Error => "error",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(Category::Success),
            "error" => Some(Category::Error),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub category: Category,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self { category: Category::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { category: Category::Error, message: message.into() }
    }
}

#[derive(Debug, Error)]
pub enum FlashError {
    #[error("malformed flash cookie")]
    Malformed,
    #[error("flash cookie signature mismatch")]
    BadSignature,
    #[error("invalid flash signing key")]
    InvalidKey,
}

/// HMAC key derived from the application's secret key.
#[derive(Clone)]
pub struct FlashKey {
    secret: Arc<[u8]>,
}

impl FlashKey {
    pub fn new(secret: &str) -> Self {
        Self { secret: Arc::from(secret.as_bytes()) }
    }

    fn mac(&self) -> Result<HmacSha256, FlashError> {
        HmacSha256::new_from_slice(&self.secret).map_err(|_| FlashError::InvalidKey)
    }

    /// Encodes and signs a flash for use as the cookie value.
    pub fn seal(&self, flash: &Flash) -> Result<String, FlashError> {
        let payload = URL_SAFE_NO_PAD.encode(format!("{}:{}", flash.category.as_str(), flash.message));

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        Ok(format!("{payload}.{signature}"))
    }

    /// Verifies and decodes a cookie value produced by [`FlashKey::seal`].
    pub fn open(&self, value: &str) -> Result<Flash, FlashError> {
        let (payload, signature) = value.split_once('.').ok_or(FlashError::Malformed)?;
        let signature = hex::decode(signature).map_err(|_| FlashError::Malformed)?;

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).map_err(|_| FlashError::BadSignature)?;

        let decoded = URL_SAFE_NO_PAD.decode(payload).map_err(|_| FlashError::Malformed)?;
        let text = String::from_utf8(decoded).map_err(|_| FlashError::Malformed)?;
        let (category, message) = text.split_once(':').ok_or(FlashError::Malformed)?;

        Ok(Flash {
            category: Category::parse(category).ok_or(FlashError::Malformed)?,
            message: message.to_string(),
        })
    }
}

pub fn set_cookie(value: &str) -> String {
    format!("{COOKIE_NAME}={value}; Path=/; HttpOnly; SameSite=Lax")
}

/// Finds the raw flash cookie value among the request's `Cookie` headers.
pub fn read_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == COOKIE_NAME && !value.is_empty())
        .map(|(_, value)| value)
}
