/// Database access layer
///
/// Free repository functions per entity, all plain SQL over sqlx.
/// Cascade behavior (profile -> posts/events, event/volunteer ->
/// associations) is enforced by the schema, not here.
pub mod event_repo;
pub mod post_repo;
pub mod profile_repo;
pub mod token_repo;
pub mod user_repo;
pub mod volunteer_repo;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// Create the PostgreSQL connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Run pending migrations at startup.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
