use chrono::{DateTime, Utc};

/// Events emitted by the token actions.
///
/// Token values never appear in events; only user ids and origins do.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    /// A fresh token pair was issued and the session hash overwritten.
    TokensIssued {
        user_id: String,
        origin: String,
        at: DateTime<Utc>,
    },
    /// A validated pair was rotated.
    TokensRefreshed {
        user_id: String,
        at: DateTime<Utc>,
    },
    /// A refresh arrived from a different origin than the one in the token.
    OriginChanged {
        user_id: String,
        previous: String,
        current: String,
        at: DateTime<Utc>,
    },
    /// A presented pair was rejected.
    ValidationFailed {
        reason: &'static str,
        at: DateTime<Utc>,
    },
}

impl AuthEvent {
    /// Returns a dot-separated event name for logging/tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TokensIssued { .. } => "token.issued",
            Self::TokensRefreshed { .. } => "token.refreshed",
            Self::OriginChanged { .. } => "session.origin_changed",
            Self::ValidationFailed { .. } => "token.validation_failed",
        }
    }

    /// Returns the timestamp when this event occurred.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::TokensIssued { at, .. }
            | Self::TokensRefreshed { at, .. }
            | Self::OriginChanged { at, .. }
            | Self::ValidationFailed { at, .. } => *at,
        }
    }
}
