//! The rule store contract.

use crate::DatabaseResult;
use async_trait::async_trait;
use rolekeeper_core::{RoleRule, RuleFilter};

/// Result of asking the store to create a rule.
///
/// A duplicate is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleCreation {
    /// The rule was inserted.
    Created(RoleRule),
    /// An identical rule already existed; nothing was written.
    Duplicate(RoleRule),
}

impl RuleCreation {
    /// True when the rule was newly inserted.
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// The rule that now exists in the store.
    pub fn rule(&self) -> &RoleRule {
        match self {
            Self::Created(rule) | Self::Duplicate(rule) => rule,
        }
    }
}

/// Durable table of role-grant rules.
///
/// Every query is scoped to a guild. Filter fields left unset match every
/// value of that field, so an empty filter selects the whole guild.
///
/// # Uniqueness
///
/// `create` looks for an identical `(guild, role, emoji, message)` tuple
/// before inserting and reports [`RuleCreation::Duplicate`] instead of
/// relying on a unique constraint.
#[async_trait]
pub trait RuleStore: Send + Sync {
    /// Insert `rule` unless an identical rule exists.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the lookup or insert fails.
    async fn create(&self, rule: RoleRule) -> DatabaseResult<RuleCreation>;

    /// Rules of `guild_id` matching `filter`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    async fn find_many(&self, guild_id: &str, filter: &RuleFilter)
    -> DatabaseResult<Vec<RoleRule>>;

    /// Delete the rules of `guild_id` matching `filter`.
    ///
    /// Returns the number of rules removed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails.
    async fn delete_many(&self, guild_id: &str, filter: &RuleFilter) -> DatabaseResult<usize>;
}
