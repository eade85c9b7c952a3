//! Database connection utilities.

use crate::DatabaseResult;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use rolekeeper_error::{DatabaseError, DatabaseErrorKind};
use tracing::{info, instrument};

/// Migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Establish a connection to the PostgreSQL database at `database_url`.
///
/// # Errors
///
/// Returns an error if the connection cannot be opened.
pub fn establish_connection(database_url: &str) -> DatabaseResult<PgConnection> {
    PgConnection::establish(database_url)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))
}

/// Establish a connection using the URL stored in the environment variable `var`.
///
/// # Errors
///
/// Returns an error if the variable is unset or the connection fails.
pub fn establish_connection_from_env(var: &str) -> DatabaseResult<PgConnection> {
    let database_url = std::env::var(var).map_err(|_| {
        DatabaseError::new(DatabaseErrorKind::Connection(format!(
            "{} environment variable not set",
            var
        )))
    })?;
    establish_connection(&database_url)
}

/// Apply every pending embedded migration.
///
/// Returns the versions that were applied, oldest first.
#[instrument(skip(conn))]
pub fn run_migrations(conn: &mut PgConnection) -> DatabaseResult<Vec<String>> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Migration(e.to_string())))?
        .into_iter()
        .map(|version| version.to_string())
        .collect::<Vec<_>>();

    info!(count = applied.len(), "Applied pending migrations");
    Ok(applied)
}
