//! SQLite persistence for breaks, their revision history and sound settings.
//!
//! [`BreakStore`] is the only writer for break data; the repositories are
//! thin query helpers it composes inside transactions.

use std::path::Path;
use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

pub mod error;
pub mod models;
pub mod repositories;
pub mod store;

pub use error::StoreError;
pub use store::{BreakStore, SeedOutcome, SeedReport};

pub type DbPool = sqlx::SqlitePool;

/// Embedded schema migrations (`crates/db/migrations`).
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Create a connection pool for the database file at `path`.
///
/// Creates the file (and its parent directory) if missing. Connections use
/// WAL journaling so readers see a consistent snapshot while a write is in
/// flight, and `synchronous = FULL` so a committed write survives a crash.
pub async fn create_pool(path: &Path) -> Result<DbPool, sqlx::Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Full)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(options)
        .await
}

/// Round-trip a trivial query to verify the pool is usable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations. Already-applied migrations are skipped.
pub async fn run_migrations(pool: &DbPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}
