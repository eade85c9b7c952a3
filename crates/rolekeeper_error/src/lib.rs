//! Error types for Rolekeeper.
//!
//! This crate provides the foundation error types shared across the workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use rolekeeper_error::{ConfigError, RolekeeperResult};
//!
//! fn load() -> RolekeeperResult<String> {
//!     Err(ConfigError::new("DISCORD_TOKEN not set"))?
//! }
//!
//! assert!(load().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod database;
mod error;

pub use config::ConfigError;
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{RolekeeperError, RolekeeperErrorKind, RolekeeperResult};
