use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::AuthError;

/// The single live session of a user.
///
/// `refresh_token_hash` is a PHC-format hash of the raw refresh token bytes.
/// Saving a session replaces whatever was stored for the user before.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub refresh_token_hash: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("refresh_token_hash", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Stores `session`, overwriting any existing record for the same user.
    async fn save(&self, session: &Session) -> Result<(), AuthError>;

    async fn find_session(&self, user_id: &str) -> Result<Option<Session>, AuthError>;
}
