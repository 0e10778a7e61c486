use chrono::Utc;
use std::sync::Arc;

use crate::codec::{TokenCodec, TokenPair};
use crate::crypto::{Argon2Hasher, SecretHasher, generate_token_id};
use crate::events::{AuthEvent, dispatch};
use crate::validators::validate_user_id;
use crate::{AuthError, Session, SessionRepository, UserRepository};

/// Issues a new token pair and makes it the user's only valid session.
pub struct IssueTokensAction<U: UserRepository, S: SessionRepository> {
    pub(super) user_repository: U,
    session_repository: S,
    codec: TokenCodec,
    hasher: Arc<dyn SecretHasher>,
}

impl<U: UserRepository, S: SessionRepository> IssueTokensAction<U, S> {
    pub fn new(user_repository: U, session_repository: S, codec: TokenCodec) -> Self {
        Self {
            user_repository,
            session_repository,
            codec,
            hasher: Arc::new(Argon2Hasher::default()),
        }
    }

    /// Replaces the refresh token hasher.
    #[must_use]
    pub fn with_hasher(mut self, hasher: Arc<dyn SecretHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    /// Issues tokens for `user_id`, bound to the client `origin`.
    ///
    /// `user_id` is canonicalized first; the directory lookup, the `sub`
    /// claim and the session key all use the canonical form.
    ///
    /// # Returns
    ///
    /// - `Ok(TokenPair)` - the session hash was stored
    /// - `Err(AuthError::InvalidUserId)` - `user_id` is not a GUID; no
    ///   collaborator was contacted
    /// - `Err(AuthError::UserNotFound)` - unknown user
    /// - `Err(_)` - directory or store errors, unchanged; the previous
    ///   session (if any) is left as it was
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "issue_tokens", skip_all, err)
    )]
    pub async fn execute(&self, user_id: &str, origin: &str) -> Result<TokenPair, AuthError> {
        let user_id = match validate_user_id(user_id) {
            Ok(id) => id,
            Err(err) => {
                log::warn!(
                    target: "sessionguard",
                    "msg=\"invalid user id\" reason=\"{err}\""
                );
                return Err(err.into());
            }
        };

        if self.user_repository.find_user_by_id(&user_id).await?.is_none() {
            log::warn!(
                target: "sessionguard",
                "msg=\"user not found\" user_id={user_id}"
            );
            return Err(AuthError::UserNotFound);
        }

        let token_id = generate_token_id();
        let access_token = self.codec.sign_access_token(&user_id, origin, &token_id)?;
        let refresh_token = self.codec.encrypt_refresh_token(&token_id)?;

        let session = Session {
            user_id: user_id.clone(),
            refresh_token_hash: self.hasher.hash(&refresh_token)?,
        };
        self.session_repository.save(&session).await?;

        dispatch(AuthEvent::TokensIssued {
            user_id: user_id.clone(),
            origin: origin.to_owned(),
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "sessionguard",
            "msg=\"tokens issued\" user_id={user_id}"
        );

        Ok(TokenPair {
            access_token,
            refresh_token: self.codec.encode_refresh_token(&refresh_token),
        })
    }
}
