//! Database access layer.
//!
//! SQLite via `sqlx`. Two tables back the whole service: `uploads`
//! (one row per accepted file) and `generated_images` (one row per
//! finished rendering job, holding the remote task document as JSON).

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

pub mod models;
pub mod repositories;

/// Connection pool alias used across the workspace.
pub type DbPool = SqlitePool;

/// Embedded migrations, applied at startup and by tests.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open a pool against `database_url` (e.g. `sqlite://mjstudio.db`),
/// creating the database file if it does not exist yet.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Cheap liveness probe used by the health endpoint.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Bring the schema up to date.
pub async fn run_migrations(pool: &DbPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    tracing::debug!("Database migrations applied");
    Ok(())
}
