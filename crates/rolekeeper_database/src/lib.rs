//! Role rule persistence for Rolekeeper.
//!
//! This crate owns the durable table of reaction-role rules. Everything else
//! in the workspace reaches it through the [`RuleStore`] trait and holds
//! rules by value.
//!
//! # Implementations
//!
//! - [`PostgresRuleStore`] - Diesel-backed PostgreSQL store
//! - [`InMemoryRuleStore`] - volatile store for tests and local runs
//!
//! # Example
//!
//! ```rust,ignore
//! use rolekeeper_database::{establish_connection, run_migrations, PostgresRuleStore};
//!
//! let mut conn = establish_connection("postgres://localhost/rolekeeper")?;
//! run_migrations(&mut conn)?;
//! let store = PostgresRuleStore::new(conn);
//! ```

mod connection;
mod memory;
mod models;
mod postgres;
mod store;

pub mod schema;

pub use connection::{MIGRATIONS, establish_connection, establish_connection_from_env, run_migrations};
pub use memory::InMemoryRuleStore;
pub use models::{NewRoleRuleRow, RoleRuleRow};
pub use postgres::PostgresRuleStore;
pub use store::{RuleCreation, RuleStore};

use rolekeeper_error::DatabaseError;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
