//! Discord integration for Rolekeeper.
//!
//! Available with the `discord` feature.
//!
//! - **adapter**: serenity-backed implementation of the platform traits
//! - **handler**: gateway event handler wiring events to the engine
//! - **interactions**: slash command definitions and reply delivery
//! - **client**: bot lifecycle with an explicit shutdown path
//!
//! ```rust,ignore
//! use rolekeeper_social::{EngineSettings, RolekeeperBot, RolekeeperHandler};
//!
//! let handler = RolekeeperHandler::new(store, EngineSettings::default(), None);
//! let mut bot = RolekeeperBot::new(&token, handler).await?;
//! let shutdown = bot.shutdown_handle();
//! bot.start().await?;
//! ```

mod adapter;
mod client;
mod handler;
mod interactions;

pub use adapter::SerenityPlatform;
pub use client::{RolekeeperBot, ShutdownHandle};
pub use handler::RolekeeperHandler;
pub use interactions::{InteractionResponder, command_definitions};
