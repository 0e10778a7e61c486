use std::sync::Arc;

use crate::actions::{IssueTokensAction, RefreshTokensAction, ValidateTokensAction};
use crate::codec::{AccessTokenClaims, TokenCodec, TokenPair};
use crate::config::AuthConfig;
use crate::crypto::{Argon2Hasher, SecretHasher};
use crate::{AuthError, Notifier, SessionRepository, UserRepository};

/// Entry point bundling the token actions over one set of collaborators.
///
/// The session store is cloned into the issuing and validating halves, so it
/// must share state across clones (a connection pool, an `Arc`ed map).
pub struct AuthService<U, S, N>
where
    U: UserRepository,
    S: SessionRepository + Clone,
    N: Notifier,
{
    validate: ValidateTokensAction<S>,
    refresh: RefreshTokensAction<U, S, N>,
}

impl<U, S, N> AuthService<U, S, N>
where
    U: UserRepository,
    S: SessionRepository + Clone,
    N: Notifier,
{
    /// Creates a service using the default Argon2 parameters.
    pub fn new(users: U, sessions: S, notifier: N, codec: TokenCodec) -> Self {
        Self::with_hasher(users, sessions, notifier, codec, Arc::new(Argon2Hasher::default()))
    }

    /// Creates a service with a custom refresh token hasher.
    pub fn with_hasher(
        users: U,
        sessions: S,
        notifier: N,
        codec: TokenCodec,
        hasher: Arc<dyn SecretHasher>,
    ) -> Self {
        let issue = IssueTokensAction::new(users, sessions.clone(), codec.clone())
            .with_hasher(Arc::clone(&hasher));

        Self {
            validate: ValidateTokensAction::new(sessions, codec).with_hasher(hasher),
            refresh: RefreshTokensAction::new(issue, notifier),
        }
    }

    /// Creates a service from an [`AuthConfig`].
    ///
    /// # Errors
    /// Returns `AuthError::ConfigurationError` for unusable key material.
    pub fn from_config(
        config: &AuthConfig,
        users: U,
        sessions: S,
        notifier: N,
    ) -> Result<Self, AuthError> {
        let codec = config.codec()?;
        Ok(Self::with_hasher(
            users,
            sessions,
            notifier,
            codec,
            Arc::new(config.hasher.clone()),
        ))
    }

    /// Issues a new pair for `user_id`, replacing any previous session.
    pub async fn issue(&self, user_id: &str, origin: &str) -> Result<TokenPair, AuthError> {
        self.refresh.issue_action().execute(user_id, origin).await
    }

    /// Validates a pair and returns the access token's claims.
    pub async fn validate(&self, pair: &TokenPair) -> Result<AccessTokenClaims, AuthError> {
        self.validate.execute(pair).await
    }

    /// Rotates a validated pair, notifying the user on origin change.
    pub async fn refresh(
        &self,
        claims: &AccessTokenClaims,
        origin: &str,
    ) -> Result<TokenPair, AuthError> {
        self.refresh.execute(claims, origin).await
    }

    /// Validates `pair` and, if it is good, rotates it.
    pub async fn validate_and_refresh(
        &self,
        pair: &TokenPair,
        origin: &str,
    ) -> Result<TokenPair, AuthError> {
        let claims = self.validate(pair).await?;
        self.refresh(&claims, origin).await
    }
}
