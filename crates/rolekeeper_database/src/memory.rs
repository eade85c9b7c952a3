//! In-memory rule store.

use crate::{DatabaseResult, RuleCreation, RuleStore};
use async_trait::async_trait;
use rolekeeper_core::{RoleRule, RuleFilter};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Volatile [`RuleStore`] backed by a vector.
///
/// Preserves insertion order. Used by tests and by `run --in-memory`.
#[derive(Debug, Default)]
pub struct InMemoryRuleStore {
    rules: RwLock<Vec<RoleRule>>,
}

impl InMemoryRuleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rules across all guilds.
    pub async fn len(&self) -> usize {
        self.rules.read().await.len()
    }

    /// True when no rules are stored.
    pub async fn is_empty(&self) -> bool {
        self.rules.read().await.is_empty()
    }
}

fn in_scope(rule: &RoleRule, guild_id: &str, filter: &RuleFilter) -> bool {
    rule.guild_id() == guild_id && filter.matches(rule)
}

#[async_trait]
impl RuleStore for InMemoryRuleStore {
    #[instrument(skip(self, rule), fields(guild_id = %rule.guild_id(), role_id = %rule.role_id()))]
    async fn create(&self, rule: RoleRule) -> DatabaseResult<RuleCreation> {
        let mut rules = self.rules.write().await;

        if let Some(existing) = rules.iter().find(|r| **r == rule) {
            debug!("Rule already configured");
            return Ok(RuleCreation::Duplicate(existing.clone()));
        }

        rules.push(rule.clone());
        Ok(RuleCreation::Created(rule))
    }

    #[instrument(skip(self))]
    async fn find_many(
        &self,
        guild_id: &str,
        filter: &RuleFilter,
    ) -> DatabaseResult<Vec<RoleRule>> {
        let rules = self.rules.read().await;
        Ok(rules
            .iter()
            .filter(|r| in_scope(r, guild_id, filter))
            .cloned()
            .collect())
    }

    #[instrument(skip(self))]
    async fn delete_many(&self, guild_id: &str, filter: &RuleFilter) -> DatabaseResult<usize> {
        let mut rules = self.rules.write().await;
        let before = rules.len();
        rules.retain(|r| !in_scope(r, guild_id, filter));
        Ok(before - rules.len())
    }
}
