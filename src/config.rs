//! Service-level configuration.
//!
//! [`AuthConfig`] gathers everything needed to build an
//! [`AuthService`](crate::AuthService): key material, access token lifetime
//! and the cost of the refresh token hash.
//!
//! # Example
//!
//! ```rust,ignore
//! use sessionguard::config::AuthConfig;
//! use chrono::Duration;
//!
//! // From SIGNING_KEY / ACCESS_TOKEN_TTL / REFRESH_TOKEN_KEY
//! let config = AuthConfig::from_env()?;
//!
//! // Or in code
//! let config = AuthConfig::new("a-signing-key-of-at-least-32-bytes")
//!     .with_access_ttl(Duration::minutes(5));
//! let codec = config.codec()?;
//! ```

use chrono::Duration;
use std::env;
use std::net::IpAddr;

use crate::codec::{CodecConfig, TokenCodec};
use crate::crypto::Argon2Hasher;
use crate::{AuthError, SecretKey};

/// Environment variable holding the signing key.
pub const SIGNING_KEY_VAR: &str = "SIGNING_KEY";
/// Environment variable holding the access token lifetime in seconds.
pub const ACCESS_TOKEN_TTL_VAR: &str = "ACCESS_TOKEN_TTL";
/// Environment variable holding an optional separate refresh token key.
pub const REFRESH_TOKEN_KEY_VAR: &str = "REFRESH_TOKEN_KEY";
/// Environment variable holding comma-separated reverse proxy addresses.
pub const TRUSTED_PROXY_IPS_VAR: &str = "TRUSTED_PROXY_IPS";

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC key for access tokens; also the source of the refresh token key
    /// unless `refresh_key` is set.
    pub signing_key: SecretKey,

    /// Independent key for refresh token encryption.
    pub refresh_key: Option<SecretKey>,

    /// How long access tokens remain valid after issuance.
    ///
    /// Default: 15 minutes
    pub access_ttl: Duration,

    /// Issuer claim embedded in and required of access tokens.
    pub issuer: Option<String>,

    /// Hash parameters for stored refresh tokens.
    pub hasher: Argon2Hasher,

    /// Reverse proxies whose forwarding headers may name the client origin.
    ///
    /// Default: empty, so the connection peer is always the origin.
    pub trusted_proxies: Vec<IpAddr>,
}

impl AuthConfig {
    /// Creates a configuration with default lifetimes and hash cost.
    pub fn new(signing_key: impl Into<SecretKey>) -> Self {
        Self {
            signing_key: signing_key.into(),
            refresh_key: None,
            access_ttl: Duration::minutes(15),
            issuer: None,
            hasher: Argon2Hasher::default(),
            trusted_proxies: Vec::new(),
        }
    }

    /// Long-lived access tokens for local development.
    pub fn development(signing_key: impl Into<SecretKey>) -> Self {
        Self {
            access_ttl: Duration::hours(24),
            ..Self::new(signing_key)
        }
    }

    /// Short-lived access tokens and the production hash cost.
    pub fn strict(signing_key: impl Into<SecretKey>) -> Self {
        Self {
            access_ttl: Duration::minutes(5),
            hasher: Argon2Hasher::production(),
            ..Self::new(signing_key)
        }
    }

    /// Reads `SIGNING_KEY`, `ACCESS_TOKEN_TTL` (seconds, optional),
    /// `REFRESH_TOKEN_KEY` (optional) and `TRUSTED_PROXY_IPS` (optional) from
    /// the environment.
    ///
    /// # Errors
    /// Returns `AuthError::ConfigurationError` when the signing key is
    /// missing, the TTL is not a positive integer or a proxy address does not
    /// parse.
    pub fn from_env() -> Result<Self, AuthError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, AuthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let signing_key = lookup(SIGNING_KEY_VAR).ok_or_else(|| {
            AuthError::ConfigurationError(format!("{SIGNING_KEY_VAR} is not set"))
        })?;

        let mut config = Self::new(signing_key);

        if let Some(raw) = lookup(ACCESS_TOKEN_TTL_VAR) {
            let seconds: i64 = raw
                .trim()
                .parse()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| {
                    AuthError::ConfigurationError(format!(
                        "invalid {ACCESS_TOKEN_TTL_VAR} variable: {raw:?}"
                    ))
                })?;
            config.access_ttl = Duration::seconds(seconds);
        }

        // set-but-empty counts as unset
        config.refresh_key = lookup(REFRESH_TOKEN_KEY_VAR)
            .map(SecretKey::from)
            .filter(|key| !key.is_empty());

        if let Some(raw) = lookup(TRUSTED_PROXY_IPS_VAR) {
            config.trusted_proxies = raw
                .split(',')
                .map(str::trim)
                .filter(|ip| !ip.is_empty())
                .map(|ip| {
                    ip.parse::<IpAddr>().map_err(|_| {
                        AuthError::ConfigurationError(format!(
                            "invalid {TRUSTED_PROXY_IPS_VAR} entry: {ip:?}"
                        ))
                    })
                })
                .collect::<Result<_, _>>()?;
        }

        Ok(config)
    }

    #[must_use]
    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_refresh_key(mut self, key: impl Into<SecretKey>) -> Self {
        self.refresh_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    #[must_use]
    pub fn with_trusted_proxies(mut self, proxies: impl IntoIterator<Item = IpAddr>) -> Self {
        self.trusted_proxies = proxies.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_hasher(mut self, hasher: Argon2Hasher) -> Self {
        self.hasher = hasher;
        self
    }

    /// Validates the key material and builds the codec configuration.
    pub fn codec_config(&self) -> Result<CodecConfig, AuthError> {
        let mut codec = CodecConfig::new(self.signing_key.clone())?.with_access_ttl(self.access_ttl);

        if let Some(ref key) = self.refresh_key {
            codec = codec.with_refresh_key(key.clone())?;
        }
        if let Some(ref issuer) = self.issuer {
            codec = codec.with_issuer(issuer.clone());
        }

        Ok(codec)
    }

    /// Builds a [`TokenCodec`] from this configuration.
    pub fn codec(&self) -> Result<TokenCodec, AuthError> {
        self.codec_config().map(TokenCodec::new)
    }
}
