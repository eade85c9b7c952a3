//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};

/// Rolekeeper - grant roles when members react to messages
#[derive(Parser, Debug)]
#[command(name = "rolekeeper")]
#[command(about = "Grant roles when members react to messages", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connect to Discord and serve reactions and commands until Ctrl-C
    Run {
        /// Keep rules in memory instead of PostgreSQL
        #[arg(long)]
        in_memory: bool,
    },

    /// Apply pending database migrations
    Migrate,

    /// Inspect stored rules
    #[command(subcommand)]
    Rules(RulesCommands),
}

/// Rule inspection subcommands
#[derive(Subcommand, Debug)]
pub enum RulesCommands {
    /// List the rules of a guild
    List {
        /// Guild ID
        #[arg(long)]
        guild: String,

        /// Only rules on this message
        #[arg(long)]
        message: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

/// Output format for rule listings
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// One block per rule
    Human,
    /// JSON array
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_rules_list() {
        let cli = Cli::parse_from(["rolekeeper", "-v", "rules", "list", "--guild", "g1"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Rules(RulesCommands::List { guild, message, .. }) => {
                assert_eq!(guild, "g1");
                assert!(message.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
