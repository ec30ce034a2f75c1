//! Embedded schema migrations, applied at start-up when PostgreSQL backs the
//! store.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::RepositoryError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply every pending migration over a dedicated synchronous connection.
///
/// Blocks the calling thread; run it from `spawn_blocking` inside a runtime.
///
/// # Errors
/// Returns [`RepositoryError::Connection`] when the database is unreachable
/// and [`RepositoryError::Query`] when a migration fails.
pub fn run_pending_migrations(database_url: &str) -> Result<(), RepositoryError> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| RepositoryError::connection(err.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| RepositoryError::query(format!("migration: {err}")))?;
    info!(count = applied.len(), "applied pending migrations");
    Ok(())
}
