//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the rolekeeper binary.

mod commands;
mod migrate;
mod rules;
mod run;

pub use commands::{Cli, Commands};
pub use migrate::migrate;
pub use rules::handle_rules_command;
pub use run::run_bot;
