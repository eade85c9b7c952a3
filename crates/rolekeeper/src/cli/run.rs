//! Bot run command.

use rolekeeper::{
    BotConfig, InMemoryRuleStore, PostgresRuleStore, RolekeeperResult, RuleStore,
    establish_connection,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Pick the rule store for this run.
fn rule_store(config: &BotConfig, in_memory: bool) -> RolekeeperResult<Arc<dyn RuleStore>> {
    if in_memory {
        warn!("Using in-memory rule store; rules are lost on exit");
        return Ok(Arc::new(InMemoryRuleStore::new()));
    }
    let conn = establish_connection(&config.database_url()?)?;
    Ok(Arc::new(PostgresRuleStore::new(conn)))
}

/// Run the bot until Ctrl-C, then close the gateway connection.
#[cfg(feature = "discord")]
pub async fn run_bot(
    config: &BotConfig,
    in_memory: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use rolekeeper::{RolekeeperBot, RolekeeperHandler};

    let token = config.discord_token()?;
    let store = rule_store(config, in_memory)?;
    let handler = RolekeeperHandler::new(
        store,
        config.engine_settings(),
        config.development_guild_id.as_deref(),
    )?;
    let mut bot = RolekeeperBot::new(&token, handler).await?;
    let shutdown = bot.shutdown_handle();

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl-C");
                shutdown.shutdown().await;
            }
            Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C"),
        }
    });

    bot.start().await?;
    Ok(())
}

/// Running the bot needs the `discord` feature.
#[cfg(not(feature = "discord"))]
pub async fn run_bot(
    config: &BotConfig,
    in_memory: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let _store = rule_store(config, in_memory)?;
    Err(rolekeeper::ConfigError::new("rolekeeper was built without the `discord` feature").into())
}
