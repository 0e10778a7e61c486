use chrono::Utc;

use crate::codec::{AccessTokenClaims, TokenPair};
use crate::events::{AuthEvent, dispatch};
use crate::{AuthError, Notifier, SessionRepository, UserRepository};

use super::IssueTokensAction;

pub const ORIGIN_CHANGED_SUBJECT: &str = "Different IP address auth refresh";

fn origin_changed_body(origin: &str) -> String {
    format!("Your tokens have been refreshed by different ip address {origin}")
}

/// Re-issues tokens for an already validated pair.
///
/// When the caller's origin differs from the one bound into the old access
/// token, the user is notified before anything is re-issued.
pub struct RefreshTokensAction<U: UserRepository, S: SessionRepository, N: Notifier> {
    issue: IssueTokensAction<U, S>,
    notifier: N,
}

impl<U: UserRepository, S: SessionRepository, N: Notifier> RefreshTokensAction<U, S, N> {
    pub fn new(issue: IssueTokensAction<U, S>, notifier: N) -> Self {
        Self { issue, notifier }
    }

    pub(crate) fn issue_action(&self) -> &IssueTokensAction<U, S> {
        &self.issue
    }

    /// Issues a fresh pair for `claims.sub` bound to `origin`.
    ///
    /// `claims` must come from a successful validation; this method does not
    /// re-check them.
    ///
    /// # Returns
    ///
    /// - `Ok(TokenPair)` - new pair; the old refresh token no longer validates
    /// - `Err(AuthError::UserNotFound)` - origin changed and the user is gone
    /// - `Err(_)` - directory, notifier or store error; when the notifier
    ///   fails no new session is stored
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "refresh_tokens", skip_all, err)
    )]
    pub async fn execute(
        &self,
        claims: &AccessTokenClaims,
        origin: &str,
    ) -> Result<TokenPair, AuthError> {
        if claims.origin_changed(origin) {
            self.notify_origin_change(claims, origin).await?;
        }

        let pair = self.issue.execute(claims.user_id(), origin).await?;

        dispatch(AuthEvent::TokensRefreshed {
            user_id: claims.sub.clone(),
            at: Utc::now(),
        })
        .await;

        Ok(pair)
    }

    async fn notify_origin_change(
        &self,
        claims: &AccessTokenClaims,
        origin: &str,
    ) -> Result<(), AuthError> {
        let user = self
            .issue
            .user_repository
            .find_user_by_id(claims.user_id())
            .await?
            .ok_or(AuthError::UserNotFound)?;

        log::warn!(
            target: "sessionguard",
            "msg=\"origin changed on refresh\" user_id={} previous={} current={}",
            claims.sub,
            claims.origin,
            origin
        );

        dispatch(AuthEvent::OriginChanged {
            user_id: claims.sub.clone(),
            previous: claims.origin.clone(),
            current: origin.to_owned(),
            at: Utc::now(),
        })
        .await;

        self.notifier
            .send(ORIGIN_CHANGED_SUBJECT, &origin_changed_body(origin), &user.email)
            .await
    }
}
