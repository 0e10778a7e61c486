use sqlx::PgPool;

/// Creates the `sessions` table if it does not exist yet.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
