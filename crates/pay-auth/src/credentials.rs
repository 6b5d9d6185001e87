//! Application credentials.
//!
//! The application key is redacted in Debug output to prevent accidental
//! exposure in logs.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::{Error, ErrorKind, Result};

/// Credentials of a Corepay application user.
///
/// The application key is a base64-encoded shared secret issued by the
/// Corepay control panel. It is decoded eagerly: an empty or malformed key is
/// rejected here, at construction, so that misconfiguration never surfaces as
/// a per-call failure.
#[derive(Clone)]
pub struct ApplicationCredentials {
    user_id: u64,
    application_key: String,
    secret: Vec<u8>,
}

impl std::fmt::Debug for ApplicationCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationCredentials")
            .field("user_id", &self.user_id)
            .field("application_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl ApplicationCredentials {
    /// Create new credentials from a user id and a base64 application key.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::InvalidCredentials` if the key is empty or does not
    /// decode from base64.
    pub fn new(user_id: u64, application_key: impl Into<String>) -> Result<Self> {
        let application_key = application_key.into();

        if application_key.trim().is_empty() {
            return Err(Error::new(ErrorKind::InvalidCredentials(
                "application key is empty".to_string(),
            )));
        }

        let secret = BASE64.decode(application_key.trim()).map_err(|e| {
            Error::with_source(
                ErrorKind::InvalidCredentials("application key is not valid base64".to_string()),
                e,
            )
        })?;

        Ok(Self {
            user_id,
            application_key,
            secret,
        })
    }

    /// Load credentials from environment variables.
    ///
    /// Required environment variables:
    /// - `COREPAY_USER_ID`
    /// - `COREPAY_APPLICATION_KEY`
    pub fn from_env() -> Result<Self> {
        let user_id = std::env::var("COREPAY_USER_ID")
            .map_err(|_| Error::new(ErrorKind::EnvVar("COREPAY_USER_ID".to_string())))?;

        let user_id: u64 = user_id.trim().parse().map_err(|e| {
            Error::with_source(
                ErrorKind::InvalidCredentials("COREPAY_USER_ID is not an integer".to_string()),
                e,
            )
        })?;

        let application_key = std::env::var("COREPAY_APPLICATION_KEY")
            .map_err(|_| Error::new(ErrorKind::EnvVar("COREPAY_APPLICATION_KEY".to_string())))?;

        Self::new(user_id, application_key)
    }

    /// Get the application user id.
    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    /// Get the base64 application key.
    pub fn application_key(&self) -> &str {
        &self.application_key
    }

    /// Get the decoded secret bytes used as the HMAC key.
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }
}
