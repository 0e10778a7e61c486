use chrono::Utc;
use std::sync::Arc;

use crate::codec::{AccessTokenClaims, TokenCodec, TokenPair};
use crate::crypto::{Argon2Hasher, SecretHasher};
use crate::events::{AuthEvent, dispatch};
use crate::{AuthError, SessionRepository};

/// Checks that a token pair belongs together and is the user's live session.
pub struct ValidateTokensAction<S: SessionRepository> {
    session_repository: S,
    codec: TokenCodec,
    hasher: Arc<dyn SecretHasher>,
}

impl<S: SessionRepository> ValidateTokensAction<S> {
    pub fn new(session_repository: S, codec: TokenCodec) -> Self {
        Self {
            session_repository,
            codec,
            hasher: Arc::new(Argon2Hasher::default()),
        }
    }

    #[must_use]
    pub fn with_hasher(mut self, hasher: Arc<dyn SecretHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    /// Validates `pair` and returns the access token's claims.
    ///
    /// The refresh token is decrypted before the access token is looked at,
    /// so a tampered refresh token is reported as such even when the access
    /// token has also expired.
    ///
    /// # Returns
    ///
    /// - `Ok(claims)` - signature, expiry, binding and session all check out
    /// - `Err(AuthError::MalformedRefreshToken)` - refresh token is not valid
    ///   transport text
    /// - `Err(AuthError::InvalidRefreshToken)` - refresh token fails
    ///   authentication, belongs to another pair, or was superseded
    /// - `Err(AuthError::InvalidAccessToken)` - bad signature, algorithm or
    ///   expiry
    /// - `Err(AuthError::SessionNotFound)` - no session stored for the user
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "validate_tokens", skip_all, err)
    )]
    pub async fn execute(&self, pair: &TokenPair) -> Result<AccessTokenClaims, AuthError> {
        match self.check(pair).await {
            Ok(claims) => Ok(claims),
            Err(err) => {
                log::info!(
                    target: "sessionguard",
                    "msg=\"token validation failed\" reason={}",
                    err.code()
                );
                dispatch(AuthEvent::ValidationFailed {
                    reason: err.code(),
                    at: Utc::now(),
                })
                .await;
                Err(err)
            }
        }
    }

    async fn check(&self, pair: &TokenPair) -> Result<AccessTokenClaims, AuthError> {
        let raw = self.codec.decode_refresh_token(&pair.refresh_token)?;
        let token_id = self.codec.decrypt_refresh_token(&raw)?;
        let claims = self.codec.verify_access_token(&pair.access_token)?;

        if claims.token_id() != token_id {
            return Err(AuthError::InvalidRefreshToken);
        }

        let session = self
            .session_repository
            .find_session(&claims.sub)
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        // A stored hash we cannot parse cannot vouch for this token either.
        match self.hasher.verify(&raw, &session.refresh_token_hash) {
            Ok(true) => Ok(claims),
            Ok(false) | Err(_) => Err(AuthError::InvalidRefreshToken),
        }
    }
}
