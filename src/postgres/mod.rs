//! Postgres-backed session store. Requires the `postgres` feature.
//!
//! ```rust,ignore
//! use sessionguard::postgres::{self, PostgresSessionRepository};
//!
//! let pool = sqlx::PgPool::connect(&database_url).await?;
//! postgres::migrations::run(&pool).await?;
//! let sessions = PostgresSessionRepository::new(pool);
//! ```

pub mod migrations;
mod session;

pub use session::PostgresSessionRepository;
