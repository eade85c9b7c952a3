//! Diesel models for the role_rules table.

use crate::schema::role_rules;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use rolekeeper_core::{EmojiMatch, RoleRule};

/// Database row for the role_rules table.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = role_rules)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoleRuleRow {
    pub id: i64,
    pub guild_id: String,
    pub role_id: String,
    pub emoji_id: String, // "any" for wildcard rules
    pub message_id: String,
    pub created_at: NaiveDateTime,
}

/// Insertable struct for the role_rules table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = role_rules)]
pub struct NewRoleRuleRow {
    pub guild_id: String,
    pub role_id: String,
    pub emoji_id: String,
    pub message_id: String,
}

impl From<&RoleRule> for NewRoleRuleRow {
    fn from(rule: &RoleRule) -> Self {
        Self {
            guild_id: rule.guild_id().clone(),
            role_id: rule.role_id().clone(),
            emoji_id: rule.emoji().as_stored().to_string(),
            message_id: rule.message_id().clone(),
        }
    }
}

impl From<RoleRuleRow> for RoleRule {
    fn from(row: RoleRuleRow) -> Self {
        RoleRule::new(
            row.guild_id,
            row.role_id,
            EmojiMatch::from(row.emoji_id),
            row.message_id,
        )
    }
}
