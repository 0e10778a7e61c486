use async_trait::async_trait;

use crate::events::{AuthEvent, Listener};

/// Writes events to the `log` facade.
///
/// Origin changes are always logged at WARN or above, whatever the
/// configured level, since they are the one event that can indicate a stolen
/// token pair.
pub struct LoggingListener {
    level: log::Level,
}

impl LoggingListener {
    /// Creates a listener logging at INFO level.
    pub fn new() -> Self {
        Self {
            level: log::Level::Info,
        }
    }

    /// Creates a listener logging at the given level.
    pub fn with_level(level: log::Level) -> Self {
        Self { level }
    }

    fn level_for(&self, event: &AuthEvent) -> log::Level {
        match event {
            AuthEvent::OriginChanged { .. } => self.level.min(log::Level::Warn),
            _ => self.level,
        }
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Listener for LoggingListener {
    async fn handle(&self, event: &AuthEvent) {
        log::log!(
            target: "sessionguard::events",
            self.level_for(event),
            "event={} {:?}",
            event.name(),
            event
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn origin_changed() -> AuthEvent {
        AuthEvent::OriginChanged {
            user_id: "u1".to_owned(),
            previous: "192.0.2.1".to_owned(),
            current: "198.51.100.2".to_owned(),
            at: Utc::now(),
        }
    }

    #[test]
    fn test_logging_listener_default_level() {
        assert_eq!(LoggingListener::new().level, log::Level::Info);
        assert_eq!(LoggingListener::default().level, log::Level::Info);
    }

    #[test]
    fn test_origin_change_escalated_to_warn() {
        let listener = LoggingListener::with_level(log::Level::Debug);
        assert_eq!(listener.level_for(&origin_changed()), log::Level::Warn);

        let issued = AuthEvent::TokensIssued {
            user_id: "u1".to_owned(),
            origin: "192.0.2.1".to_owned(),
            at: Utc::now(),
        };
        assert_eq!(listener.level_for(&issued), log::Level::Debug);
    }

    #[test]
    fn test_error_level_kept_for_origin_change() {
        let listener = LoggingListener::with_level(log::Level::Error);
        assert_eq!(listener.level_for(&origin_changed()), log::Level::Error);
    }

    #[tokio::test]
    async fn test_logging_listener_handle() {
        // should not panic
        LoggingListener::new().handle(&origin_changed()).await;
    }
}
