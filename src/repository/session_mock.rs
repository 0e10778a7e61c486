#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::AuthError;

use super::session::{Session, SessionRepository};

/// In-memory session store.
///
/// Clones share the same underlying map. Call counters and an injectable
/// failure make it usable for asserting which collaborators an operation
/// touched.
#[derive(Clone, Default)]
pub struct MockSessionRepository {
    pub sessions: Arc<Mutex<HashMap<String, Session>>>,
    saves: Arc<AtomicUsize>,
    lookups: Arc<AtomicUsize>,
    failure: Arc<Mutex<Option<AuthError>>>,
}

impl MockSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with `err`.
    pub fn fail_with(&self, err: AuthError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_failure(&self) -> Result<(), AuthError> {
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn save(&self, session: &Session) -> Result<(), AuthError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        self.sessions
            .lock()
            .unwrap()
            .insert(session.user_id.clone(), session.clone());
        Ok(())
    }

    async fn find_session(&self, user_id: &str) -> Result<Option<Session>, AuthError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        Ok(self.sessions.lock().unwrap().get(user_id).cloned())
    }
}
