//! Rule inspection command handlers.

use super::commands::{OutputFormat, RulesCommands};
use rolekeeper::{
    BotConfig, PostgresRuleStore, RoleRule, RuleFilter, RuleStore, establish_connection,
};

/// Handle rule inspection commands.
pub async fn handle_rules_command(
    config: &BotConfig,
    cmd: RulesCommands,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    match cmd {
        RulesCommands::List {
            guild,
            message,
            format,
        } => {
            let store = PostgresRuleStore::new(establish_connection(&config.database_url()?)?);
            let filter = RuleFilter::from_options(None, None, message.as_deref());
            let rules = store.find_many(&guild, &filter).await?;
            print_rules(&guild, &rules, format)
        }
    }
}

fn print_rules(
    guild: &str,
    rules: &[RoleRule],
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(rules)?);
        }
        OutputFormat::Human => {
            println!("Rules for guild '{}':", guild);
            println!("{:-<60}", "");
            for rule in rules {
                println!("Role:       {}", rule.role_id());
                println!("Emoji:      {}", rule.emoji());
                println!("Message ID: {}", rule.message_id());
                println!("{:-<60}", "");
            }
            println!("Total: {} rules", rules.len());
        }
    }
    Ok(())
}
