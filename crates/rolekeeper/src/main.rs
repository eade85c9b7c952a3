//! Rolekeeper CLI binary.
//!
//! - Run the bot until Ctrl-C
//! - Apply database migrations
//! - Inspect the stored rules of a guild

use clap::Parser;
use rolekeeper::{BotConfig, init_logging};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use cli::{Cli, Commands, handle_rules_command, migrate, run_bot};

    let cli = Cli::parse();
    let config = BotConfig::load()?;
    init_logging(&config.logging, cli.verbose)?;

    match cli.command {
        Commands::Run { in_memory } => run_bot(&config, in_memory).await?,
        Commands::Migrate => migrate(&config)?,
        Commands::Rules(rules_cmd) => handle_rules_command(&config, rules_cmd).await?,
    }

    Ok(())
}
