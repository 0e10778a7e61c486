use async_trait::async_trait;

use crate::AuthError;

/// Delivers a message to a user's contact address.
///
/// Implementations decide the channel (email, SMS, chat). Errors are
/// returned to the caller; the engine never retries a failed send.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, subject: &str, body: &str, address: &str) -> Result<(), AuthError>;
}

/// Notifier that writes every message to the `log` facade.
///
/// # Example
///
/// ```rust,ignore
/// use sessionguard::LogNotifier;
///
/// let notifier = LogNotifier::with_level(log::Level::Warn);
/// ```
#[derive(Debug, Clone)]
pub struct LogNotifier {
    level: log::Level,
}

impl LogNotifier {
    /// Creates a notifier logging at INFO level.
    pub fn new() -> Self {
        Self {
            level: log::Level::Info,
        }
    }

    /// Creates a notifier logging at the given level.
    pub fn with_level(level: log::Level) -> Self {
        Self { level }
    }
}

impl Default for LogNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, subject: &str, body: &str, address: &str) -> Result<(), AuthError> {
        log::log!(
            target: "sessionguard::notifier",
            self.level,
            "to={address} subject={subject:?} body={body:?}"
        );
        Ok(())
    }
}
