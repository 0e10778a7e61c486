use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{AccessTokenClaims, CodecConfig};
use crate::AuthError;
use crate::crypto::derive_key;

/// Length of the AES-GCM nonce prefixed to every refresh token.
pub const NONCE_LENGTH: usize = 12;

/// Algorithm used when signing access tokens.
const SIGNING_ALGORITHM: Algorithm = Algorithm::HS512;

/// HMAC algorithms accepted when verifying access tokens.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// An access token and the refresh token issued with it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Signed access token.
    pub access_token: String,
    /// Encrypted refresh token, URL-safe base64.
    pub refresh_token: String,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// Signs and verifies access tokens, seals and opens refresh tokens.
///
/// Holds only key material, so it is cheap to clone and safe to share
/// between any number of concurrent requests.
#[derive(Clone)]
pub struct TokenCodec {
    config: CodecConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    cipher: Aes256Gcm,
}

impl TokenCodec {
    /// Creates a new codec with the given configuration.
    pub fn new(config: CodecConfig) -> Self {
        let signing_key = config.signing_key.expose_secret();
        let encoding_key = EncodingKey::from_secret(signing_key);
        let decoding_key = DecodingKey::from_secret(signing_key);

        let cipher_key = match &config.refresh_key {
            Some(key) => derive_key(key.expose_secret()),
            None => derive_key(signing_key),
        };
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&cipher_key));

        Self {
            config,
            encoding_key,
            decoding_key,
            cipher,
        }
    }

    /// Signs an access token binding `subject`, `origin` and `token_id`.
    ///
    /// # Errors
    /// Returns `AuthError::ConfigurationError` if signing fails, which only
    /// happens when the key does not fit the algorithm.
    pub fn sign_access_token(
        &self,
        subject: &str,
        origin: &str,
        token_id: &str,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + self.config.access_ttl;

        let claims = AccessTokenClaims {
            jti: token_id.to_owned(),
            sub: subject.to_owned(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            origin: origin.to_owned(),
            iss: self.config.issuer.clone(),
        };

        jsonwebtoken::encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| AuthError::ConfigurationError(format!("access token signing: {e}")))
    }

    /// Verifies signature, algorithm and expiry of an access token.
    ///
    /// Every failure maps to `AuthError::InvalidAccessToken`.
    pub fn verify_access_token(&self, token: &str) -> Result<AccessTokenClaims, AuthError> {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        if let Some(ref iss) = self.config.issuer {
            validation.set_issuer(&[iss]);
        }

        jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                log::debug!(
                    target: "sessionguard",
                    "msg=\"access token rejected\" kind={:?}",
                    e.kind()
                );
                AuthError::InvalidAccessToken
            })
    }

    /// Seals `token_id` into an opaque refresh token: `nonce || ciphertext`.
    ///
    /// # Errors
    /// Returns `AuthError::Internal` if the cipher fails.
    pub fn encrypt_refresh_token(&self, token_id: &str) -> Result<Vec<u8>, AuthError> {
        let mut nonce_bytes = [0u8; NONCE_LENGTH];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, token_id.as_bytes())
            .map_err(|e| AuthError::Internal(format!("AES-GCM encrypt: {e}")))?;

        let mut sealed = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    /// Opens a refresh token and returns the token id sealed inside it.
    ///
    /// Fails with `AuthError::InvalidRefreshToken` when the input is too short
    /// to hold a nonce and payload, or when authentication fails.
    pub fn decrypt_refresh_token(&self, sealed: &[u8]) -> Result<String, AuthError> {
        if sealed.len() <= NONCE_LENGTH {
            return Err(AuthError::InvalidRefreshToken);
        }

        let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LENGTH);
        let nonce = Nonce::from_slice(nonce_bytes);

        let plaintext = self
            .cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        String::from_utf8(plaintext).map_err(|_| AuthError::InvalidRefreshToken)
    }

    /// Encodes raw refresh token bytes for transport.
    pub fn encode_refresh_token(&self, sealed: &[u8]) -> String {
        URL_SAFE.encode(sealed)
    }

    /// Decodes a refresh token from its transport form.
    ///
    /// # Errors
    /// Returns `AuthError::MalformedRefreshToken` carrying the decode error.
    pub fn decode_refresh_token(&self, encoded: &str) -> Result<Vec<u8>, AuthError> {
        URL_SAFE
            .decode(encoded)
            .map_err(|e| AuthError::MalformedRefreshToken(e.to_string()))
    }

    /// Returns the configured access token lifetime.
    pub fn access_ttl(&self) -> Duration {
        self.config.access_ttl()
    }
}
