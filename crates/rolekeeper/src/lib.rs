//! Rolekeeper: a reaction-role bot.
//!
//! Members react to a configured message and receive the roles bound to
//! that reaction. Operators manage the bindings with slash commands and can
//! grant a role to one member or to the whole guild.
//!
//! This crate re-exports the workspace crates and adds configuration
//! loading and logging initialisation for the `rolekeeper` binary.
//!
//! # Example
//!
//! ```no_run
//! use rolekeeper::BotConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BotConfig::load()?;
//! let settings = config.engine_settings();
//! println!("progress every {} grants", settings.progress_interval);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod observability;

pub use config::{
    AuditConfig, AutocompleteConfig, BotConfig, BulkGrantConfig, LoggingConfig,
};
pub use observability::init_logging;

pub use rolekeeper_core::*;
pub use rolekeeper_database::*;
pub use rolekeeper_error::*;
pub use rolekeeper_social::*;
