use chrono::Duration;
use std::fmt;

use crate::{AuthError, SecretKey};

/// Minimum required length for signing and encryption keys in bytes.
pub const MIN_KEY_LENGTH: usize = 32;

/// Configuration for token signing and refresh token encryption.
#[derive(Clone)]
pub struct CodecConfig {
    /// Key used for HMAC signing of access tokens.
    pub(crate) signing_key: SecretKey,
    /// Independent key material for refresh token encryption.
    ///
    /// When `None`, the encryption key is derived from `signing_key`.
    pub(crate) refresh_key: Option<SecretKey>,
    /// Access token lifetime. Default: 15 minutes.
    pub(crate) access_ttl: Duration,
    /// Issuer claim (optional).
    pub(crate) issuer: Option<String>,
}

impl fmt::Debug for CodecConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecConfig")
            .field("signing_key", &"[REDACTED]")
            .field(
                "refresh_key",
                &self.refresh_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("access_ttl", &self.access_ttl)
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl CodecConfig {
    /// Creates a new configuration with the given signing key.
    ///
    /// # Errors
    /// Returns `AuthError::ConfigurationError` if the key is shorter than
    /// [`MIN_KEY_LENGTH`] bytes.
    pub fn new(signing_key: impl Into<SecretKey>) -> Result<Self, AuthError> {
        let signing_key = signing_key.into();
        check_key_length("signing key", &signing_key)?;

        Ok(Self {
            signing_key,
            refresh_key: None,
            access_ttl: Duration::minutes(15),
            issuer: None,
        })
    }

    /// Sets the access token lifetime.
    #[must_use]
    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }

    /// Uses a separately provisioned key for refresh token encryption instead
    /// of deriving it from the signing key.
    ///
    /// # Errors
    /// Returns `AuthError::ConfigurationError` if the key is too short.
    pub fn with_refresh_key(mut self, key: impl Into<SecretKey>) -> Result<Self, AuthError> {
        let key = key.into();
        check_key_length("refresh key", &key)?;
        self.refresh_key = Some(key);
        Ok(self)
    }

    /// Sets the issuer claim.
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Returns the configured access token lifetime.
    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    /// Returns true if refresh tokens use their own key.
    pub fn has_separate_refresh_key(&self) -> bool {
        self.refresh_key.is_some()
    }
}

fn check_key_length(name: &str, key: &SecretKey) -> Result<(), AuthError> {
    if key.len() < MIN_KEY_LENGTH {
        return Err(AuthError::ConfigurationError(format!(
            "{name} must be at least {MIN_KEY_LENGTH} bytes, got {}",
            key.len()
        )));
    }
    Ok(())
}
