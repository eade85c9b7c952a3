//! PostgreSQL rule store.

use crate::models::{NewRoleRuleRow, RoleRuleRow};
use crate::schema::role_rules;
use crate::{DatabaseResult, RuleCreation, RuleStore};
use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::sql_types::Bool;
use rolekeeper_core::{RoleRule, RuleFilter};
use rolekeeper_error::DatabaseError;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

type RulePredicate = Box<dyn BoxableExpression<role_rules::table, Pg, SqlType = Bool>>;

/// Guild-scoped WHERE clause for `filter`.
fn rule_predicate(guild_id: &str, filter: &RuleFilter) -> RulePredicate {
    let mut predicate: RulePredicate = Box::new(role_rules::guild_id.eq(guild_id.to_string()));

    if let Some(role_id) = filter.role_id() {
        predicate = Box::new(predicate.and(role_rules::role_id.eq(role_id.clone())));
    }
    if let Some(emoji) = filter.emoji() {
        predicate = Box::new(predicate.and(role_rules::emoji_id.eq(emoji.as_stored().to_string())));
    }
    if let Some(message_id) = filter.message_id() {
        predicate = Box::new(predicate.and(role_rules::message_id.eq(message_id.clone())));
    }

    predicate
}

/// PostgreSQL implementation of [`RuleStore`].
///
/// # Example
/// ```no_run
/// use rolekeeper_database::{establish_connection, PostgresRuleStore};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let conn = establish_connection("postgres://localhost/rolekeeper")?;
/// let store = PostgresRuleStore::new(conn);
/// # Ok(())
/// # }
/// ```
pub struct PostgresRuleStore {
    /// Database connection wrapped in Arc<Mutex> for async access.
    conn: Arc<Mutex<PgConnection>>,
}

impl PostgresRuleStore {
    /// Create a store owning `conn`.
    pub fn new(conn: PgConnection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Create a store from a shared connection.
    pub fn from_arc(conn: Arc<Mutex<PgConnection>>) -> Self {
        Self { conn }
    }

    fn load(
        conn: &mut PgConnection,
        guild_id: &str,
        filter: &RuleFilter,
    ) -> DatabaseResult<Vec<RoleRuleRow>> {
        role_rules::table
            .filter(rule_predicate(guild_id, filter))
            .order(role_rules::id.asc())
            .select(RoleRuleRow::as_select())
            .load(conn)
            .map_err(DatabaseError::from)
    }
}

#[async_trait]
impl RuleStore for PostgresRuleStore {
    #[instrument(skip(self, rule), fields(guild_id = %rule.guild_id(), role_id = %rule.role_id()))]
    async fn create(&self, rule: RoleRule) -> DatabaseResult<RuleCreation> {
        let mut conn = self.conn.lock().await;

        let exact = RuleFilter::default()
            .with_role_id(rule.role_id().clone())
            .with_emoji(rule.emoji().clone())
            .with_message_id(rule.message_id().clone());

        if let Some(existing) = Self::load(&mut *conn, rule.guild_id(), &exact)?
            .into_iter()
            .next()
        {
            debug!(rule_id = existing.id, "Rule already configured");
            return Ok(RuleCreation::Duplicate(existing.into()));
        }

        let row: RoleRuleRow = diesel::insert_into(role_rules::table)
            .values(NewRoleRuleRow::from(&rule))
            .returning(RoleRuleRow::as_returning())
            .get_result(&mut *conn)
            .map_err(DatabaseError::from)?;

        info!(rule_id = row.id, "Stored role rule");
        Ok(RuleCreation::Created(row.into()))
    }

    #[instrument(skip(self))]
    async fn find_many(
        &self,
        guild_id: &str,
        filter: &RuleFilter,
    ) -> DatabaseResult<Vec<RoleRule>> {
        let mut conn = self.conn.lock().await;
        let rows = Self::load(&mut *conn, guild_id, filter)?;
        debug!(count = rows.len(), "Loaded role rules");
        Ok(rows.into_iter().map(RoleRule::from).collect())
    }

    #[instrument(skip(self))]
    async fn delete_many(&self, guild_id: &str, filter: &RuleFilter) -> DatabaseResult<usize> {
        let mut conn = self.conn.lock().await;

        let removed = diesel::delete(role_rules::table.filter(rule_predicate(guild_id, filter)))
            .execute(&mut *conn)
            .map_err(DatabaseError::from)?;

        info!(removed, "Deleted role rules");
        Ok(removed)
    }
}
