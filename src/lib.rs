//! Origin-bound access/refresh token pairs.
//!
//! `sessionguard` issues a signed access token together with an encrypted
//! refresh token for a user, stores a salted hash of the refresh token as the
//! user's single session, and on refresh verifies that both tokens belong to
//! the same issuance. When a refresh arrives from a different client origin
//! than the one recorded in the access token, the user is notified before the
//! pair is rotated.
//!
//! # Example
//!
//! ```rust,ignore
//! use sessionguard::{AuthService, CodecConfig, TokenCodec};
//! use sessionguard::{MockNotifier, MockSessionRepository, MockUserRepository};
//!
//! let codec = TokenCodec::new(CodecConfig::new("a-signing-key-of-at-least-32-bytes")?);
//! let service = AuthService::new(users, sessions, notifier, codec);
//!
//! let pair = service.issue(user_id, "203.0.113.7").await?;
//! let claims = service.validate(&pair).await?;
//! let rotated = service.refresh(&claims, "203.0.113.7").await?;
//! ```

pub mod actions;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod events;
pub mod repository;
mod secret;
mod service;
pub mod validators;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "axum_api")]
pub mod api;

pub use codec::{AccessTokenClaims, CodecConfig, TokenCodec, TokenPair};
pub use config::AuthConfig;
pub use events::register_event_listeners;
pub use repository::{
    LogNotifier, Notifier, Session, SessionRepository, StaticUserRepository, User, UserRepository,
};
pub use secret::SecretKey;
pub use service::AuthService;

#[cfg(any(test, feature = "mocks"))]
pub use repository::{MockNotifier, MockSessionRepository, MockUserRepository, SentNotification};

use std::fmt;

/// Every failure surfaced by the token engine.
///
/// The first five variants are the classified outcomes callers branch on.
/// Cryptographic failures collapse into `InvalidAccessToken` and
/// `InvalidRefreshToken`; the underlying cause is only logged at debug level.
/// The remaining variants carry collaborator and
/// infrastructure failures, which are propagated unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    InvalidUserId,
    UserNotFound,
    SessionNotFound,
    InvalidAccessToken,
    InvalidRefreshToken,
    /// The refresh token's transport encoding could not be decoded.
    MalformedRefreshToken(String),
    PasswordHashError,
    ConfigurationError(String),
    DatabaseError(String),
    NotificationError(String),
    Internal(String),
}

impl AuthError {
    /// Stable machine-readable code for this error.
    ///
    /// Unclassified errors share a single generic code so internal details do
    /// not leak to clients.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidUserId => "INVALID_USER_ID",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::SessionNotFound => "SESSION_NOT_FOUND",
            AuthError::InvalidAccessToken => "INVALID_ACCESS_TOKEN",
            AuthError::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            AuthError::MalformedRefreshToken(_)
            | AuthError::PasswordHashError
            | AuthError::ConfigurationError(_)
            | AuthError::DatabaseError(_)
            | AuthError::NotificationError(_)
            | AuthError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Returns true for the classified token failures (unauthorized).
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidAccessToken | AuthError::InvalidRefreshToken
        )
    }
}

impl std::error::Error for AuthError {}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidUserId => write!(f, "Invalid user id"),
            AuthError::UserNotFound => write!(f, "User not found"),
            AuthError::SessionNotFound => write!(f, "Session not found"),
            AuthError::InvalidAccessToken => write!(f, "Invalid access token"),
            AuthError::InvalidRefreshToken => write!(f, "Invalid refresh token"),
            AuthError::MalformedRefreshToken(msg) => {
                write!(f, "Malformed refresh token encoding: {msg}")
            }
            AuthError::PasswordHashError => write!(f, "Failed to hash refresh token"),
            AuthError::ConfigurationError(msg) => write!(f, "Configuration error: {msg}"),
            AuthError::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            AuthError::NotificationError(msg) => write!(f, "Notification error: {msg}"),
            AuthError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classified_codes() {
        assert_eq!(AuthError::InvalidUserId.code(), "INVALID_USER_ID");
        assert_eq!(AuthError::UserNotFound.code(), "USER_NOT_FOUND");
        assert_eq!(AuthError::SessionNotFound.code(), "SESSION_NOT_FOUND");
        assert_eq!(AuthError::InvalidAccessToken.code(), "INVALID_ACCESS_TOKEN");
        assert_eq!(AuthError::InvalidRefreshToken.code(), "INVALID_REFRESH_TOKEN");
    }

    #[test]
    fn test_unclassified_errors_share_generic_code() {
        let errors = [
            AuthError::MalformedRefreshToken("bad base64".to_owned()),
            AuthError::DatabaseError("connection refused".to_owned()),
            AuthError::NotificationError("smtp down".to_owned()),
            AuthError::PasswordHashError,
        ];

        for err in errors {
            assert_eq!(err.code(), "INTERNAL_SERVER_ERROR");
            assert!(!err.is_token_error());
        }
    }

    #[test]
    fn test_display_includes_detail() {
        let err = AuthError::DatabaseError("timeout".to_owned());
        assert_eq!(err.to_string(), "Database error: timeout");
    }
}
