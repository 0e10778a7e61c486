#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::AuthError;

use super::user::{User, UserRepository};

#[derive(Clone, Default)]
pub struct MockUserRepository {
    pub users: Arc<Mutex<Vec<User>>>,
    lookups: Arc<AtomicUsize>,
    failure: Arc<Mutex<Option<AuthError>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<User>) -> Self {
        let repo = Self::new();
        *repo.users.lock().unwrap() = users;
        repo
    }

    /// Makes every subsequent lookup fail with `err`.
    pub fn fail_with(&self, err: AuthError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_user_by_id(&self, user_id: &str) -> Result<Option<User>, AuthError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }

        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == user_id).cloned())
    }
}
