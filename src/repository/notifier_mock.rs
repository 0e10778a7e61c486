#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::AuthError;

use super::notifier::Notifier;

/// A message captured by [`MockNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    pub subject: String,
    pub body: String,
    pub address: String,
}

/// Notifier that records messages instead of delivering them.
///
/// Attempts are recorded even when a failure is injected, so tests can tell
/// "not attempted" apart from "attempted and failed".
#[derive(Clone, Default)]
pub struct MockNotifier {
    pub sent: Arc<Mutex<Vec<SentNotification>>>,
    failure: Arc<Mutex<Option<AuthError>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent send fail with `err`.
    pub fn fail_with(&self, err: AuthError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send(&self, subject: &str, body: &str, address: &str) -> Result<(), AuthError> {
        self.sent.lock().unwrap().push(SentNotification {
            subject: subject.to_owned(),
            body: body.to_owned(),
            address: address.to_owned(),
        });

        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
