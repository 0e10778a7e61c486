use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::{AuthError, Session, SessionRepository};

/// Stores one row per user in `sessions`, replaced on every save.
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct SessionRecord {
    user_id: String,
    refresh_token_hash: String,
}

impl From<SessionRecord> for Session {
    fn from(row: SessionRecord) -> Self {
        Session {
            user_id: row.user_id,
            refresh_token_hash: row.refresh_token_hash,
        }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn save(&self, session: &Session) -> Result<(), AuthError> {
        sqlx::query(
            r"INSERT INTO sessions (user_id, refresh_token_hash, updated_at)
              VALUES ($1, $2, now())
              ON CONFLICT (user_id)
              DO UPDATE SET refresh_token_hash = EXCLUDED.refresh_token_hash,
                            updated_at = EXCLUDED.updated_at",
        )
        .bind(&session.user_id)
        .bind(&session.refresh_token_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_session(&self, user_id: &str) -> Result<Option<Session>, AuthError> {
        let row: Option<SessionRecord> = sqlx::query_as(
            "SELECT user_id, refresh_token_hash FROM sessions WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }
}
