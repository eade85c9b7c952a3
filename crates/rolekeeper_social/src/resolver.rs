//! Matching reaction events against stored rules.

use rolekeeper_core::{RoleRule, RuleFilter};
use rolekeeper_database::{DatabaseResult, RuleStore};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Finds the rules a reaction triggers.
///
/// A rule applies when its guild and message match exactly and its emoji is
/// either the reacted emoji or the wildcard. Every applicable rule is
/// returned; there is no first-match tie-break.
pub struct RuleResolver<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for RuleResolver<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RuleStore + ?Sized> RuleResolver<S> {
    /// Create a resolver reading from `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Rules triggered by `emoji_id` on `message_id` in `guild_id`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the store query fails.
    #[instrument(skip(self))]
    pub async fn resolve(
        &self,
        guild_id: &str,
        message_id: &str,
        emoji_id: &str,
    ) -> DatabaseResult<Vec<RoleRule>> {
        let on_message = RuleFilter::default().with_message_id(message_id);
        let rules: Vec<RoleRule> = self
            .store
            .find_many(guild_id, &on_message)
            .await?
            .into_iter()
            .filter(|rule| rule.applies_to(message_id, emoji_id))
            .collect();

        debug!(matched = rules.len(), "Resolved reaction rules");
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolekeeper_core::EmojiMatch;
    use rolekeeper_database::InMemoryRuleStore;

    #[tokio::test]
    async fn test_wildcard_and_exact_both_match() {
        let store = Arc::new(InMemoryRuleStore::new());
        let party = EmojiMatch::Exact("🎉".to_string());
        for rule in [
            RoleRule::new("g1", "roleA", EmojiMatch::Any, "m1"),
            RoleRule::new("g1", "roleB", party.clone(), "m1"),
            RoleRule::new("g1", "roleC", EmojiMatch::Exact("👍".to_string()), "m1"),
            RoleRule::new("g1", "roleD", party.clone(), "m2"),
            RoleRule::new("g2", "roleE", party, "m1"),
        ] {
            store.create(rule).await.unwrap();
        }

        let resolver = RuleResolver::new(store);
        let roles: Vec<String> = resolver
            .resolve("g1", "m1", "🎉")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.role_id().clone())
            .collect();

        assert_eq!(roles, vec!["roleA".to_string(), "roleB".to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_message_resolves_nothing() {
        let store = Arc::new(InMemoryRuleStore::new());
        store
            .create(RoleRule::new("g1", "roleA", EmojiMatch::Any, "m1"))
            .await
            .unwrap();

        let resolver = RuleResolver::new(store);
        assert!(resolver.resolve("g1", "m404", "🎉").await.unwrap().is_empty());
    }
}
