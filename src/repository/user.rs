use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::AuthError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

#[cfg(any(test, feature = "mocks"))]
impl User {
    pub fn mock() -> Self {
        User {
            id: "9a4f2c1e-7b3d-4e8a-b6c5-1d2e3f4a5b6c".to_owned(),
            email: "test@example.com".to_owned(),
        }
    }

    pub fn mock_with_id(id: &str) -> Self {
        User {
            id: id.to_owned(),
            email: "test@example.com".to_owned(),
        }
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_id(&self, user_id: &str) -> Result<Option<User>, AuthError>;
}

/// User directory that knows every id and gives all of them one address.
///
/// Useful while the real directory is not wired up: issuance works for any
/// well-formed id and origin-change notifications go to `email`.
#[derive(Debug, Clone)]
pub struct StaticUserRepository {
    email: String,
}

impl StaticUserRepository {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

impl Default for StaticUserRepository {
    fn default() -> Self {
        Self::new("example@mail.com")
    }
}

#[async_trait]
impl UserRepository for StaticUserRepository {
    async fn find_user_by_id(&self, user_id: &str) -> Result<Option<User>, AuthError> {
        Ok(Some(User {
            id: user_id.to_owned(),
            email: self.email.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_user_repository_knows_everyone() {
        let repo = StaticUserRepository::default();

        let user = repo
            .find_user_by_id("9a4f2c1e-7b3d-4e8a-b6c5-1d2e3f4a5b6c")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(user.id, "9a4f2c1e-7b3d-4e8a-b6c5-1d2e3f4a5b6c");
        assert_eq!(user.email, "example@mail.com");
    }

    #[tokio::test]
    async fn test_static_user_repository_custom_email() {
        let repo = StaticUserRepository::new("security@corp.example");
        let user = repo.find_user_by_id("any").await.unwrap().unwrap();
        assert_eq!(user.email, "security@corp.example");
    }
}
