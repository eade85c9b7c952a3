//! Database migration command.

use rolekeeper::{BotConfig, RolekeeperResult, establish_connection, run_migrations};
use tracing::info;

/// Apply every pending migration to the configured database.
pub fn migrate(config: &BotConfig) -> RolekeeperResult<()> {
    let mut conn = establish_connection(&config.database_url()?)?;
    let applied = run_migrations(&mut conn)?;

    if applied.is_empty() {
        println!("Database is up to date.");
    } else {
        for version in &applied {
            println!("Applied {}", version);
        }
    }
    info!(count = applied.len(), "Migrations complete");
    Ok(())
}
