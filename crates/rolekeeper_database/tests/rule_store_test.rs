//! Tests for the rule store contract.
//!
//! The in-memory store runs everywhere. The PostgreSQL variants need a
//! migrated database at `DATABASE_URL` and are ignored by default.

use rolekeeper_core::{EmojiMatch, RoleRule, RuleFilter};
use rolekeeper_database::{InMemoryRuleStore, RuleCreation, RuleStore};

fn party() -> EmojiMatch {
    EmojiMatch::Exact("🎉".to_string())
}

async fn seed(store: &impl RuleStore, guild: &str) {
    let rules = [
        RoleRule::new(guild, "roleA", EmojiMatch::Any, "m1"),
        RoleRule::new(guild, "roleA", party(), "m2"),
        RoleRule::new(guild, "roleB", party(), "m1"),
        RoleRule::new(guild, "roleA", EmojiMatch::Exact("👍".to_string()), "m3"),
    ];
    for rule in rules {
        let created = store.create(rule).await.expect("create succeeds");
        assert!(created.is_created());
    }
}

async fn check_duplicate_is_reported(store: &impl RuleStore, guild: &str) {
    let rule = RoleRule::new(guild, "roleD", party(), "m9");

    let first = store.create(rule.clone()).await.expect("first create");
    let second = store.create(rule.clone()).await.expect("second create is not an error");

    assert_eq!(first, RuleCreation::Created(rule.clone()));
    assert_eq!(second, RuleCreation::Duplicate(rule.clone()));

    let stored = store
        .find_many(guild, &RuleFilter::default().with_role_id("roleD"))
        .await
        .expect("find");
    assert_eq!(stored, vec![rule]);
}

async fn check_guild_scoping(store: &impl RuleStore, guild: &str, other: &str) {
    seed(store, guild).await;
    seed(store, other).await;

    let all = store
        .find_many(guild, &RuleFilter::default())
        .await
        .expect("find all");
    assert_eq!(all.len(), 4);
    assert!(all.iter().all(|r| r.guild_id() == guild));
    // insertion order
    assert_eq!(all[0].emoji(), &EmojiMatch::Any);
    assert_eq!(all[3].message_id(), "m3");

    let removed = store
        .delete_many(guild, &RuleFilter::default().with_role_id("roleA"))
        .await
        .expect("delete");
    assert_eq!(removed, 3);

    let remaining = store
        .find_many(guild, &RuleFilter::default())
        .await
        .expect("find remaining");
    assert_eq!(remaining, vec![RoleRule::new(guild, "roleB", party(), "m1")]);

    let untouched = store
        .find_many(other, &RuleFilter::default())
        .await
        .expect("find other guild");
    assert_eq!(untouched.len(), 4);
}

#[tokio::test]
async fn test_in_memory_duplicate_is_reported() {
    let store = InMemoryRuleStore::new();
    check_duplicate_is_reported(&store, "g1").await;
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_in_memory_delete_by_role_is_guild_scoped() {
    let store = InMemoryRuleStore::new();
    check_guild_scoping(&store, "g1", "g2").await;
}

#[tokio::test]
async fn test_in_memory_combined_filter() {
    let store = InMemoryRuleStore::new();
    seed(&store, "g1").await;

    let filter = RuleFilter::default().with_role_id("roleA").with_message_id("m1");
    let found = store.find_many("g1", &filter).await.expect("find");
    assert_eq!(found, vec![RoleRule::new("g1", "roleA", EmojiMatch::Any, "m1")]);

    let wildcard_only = RuleFilter::default().with_emoji(EmojiMatch::Any);
    assert_eq!(store.find_many("g1", &wildcard_only).await.expect("find").len(), 1);

    let nothing = RuleFilter::default().with_message_id("missing");
    assert_eq!(store.delete_many("g1", &nothing).await.expect("delete"), 0);
    assert_eq!(store.len().await, 4);
}

mod postgres {
    use super::*;
    use rolekeeper_database::{PostgresRuleStore, establish_connection_from_env, run_migrations};

    fn store() -> PostgresRuleStore {
        dotenvy::dotenv().ok();
        let mut conn = establish_connection_from_env("DATABASE_URL").expect("DATABASE_URL");
        run_migrations(&mut conn).expect("migrations");
        PostgresRuleStore::new(conn)
    }

    fn unique_guild(label: &str) -> String {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        format!("test-{}-{}", label, nanos)
    }

    #[tokio::test]
    #[ignore] // Requires PostgreSQL
    async fn test_postgres_duplicate_is_reported() {
        let store = store();
        let guild = unique_guild("dup");
        check_duplicate_is_reported(&store, &guild).await;
        store
            .delete_many(&guild, &RuleFilter::default())
            .await
            .expect("cleanup");
    }

    #[tokio::test]
    #[ignore] // Requires PostgreSQL
    async fn test_postgres_delete_by_role_is_guild_scoped() {
        let store = store();
        let guild = unique_guild("scope");
        let other = unique_guild("other");
        check_guild_scoping(&store, &guild, &other).await;
        for g in [&guild, &other] {
            store
                .delete_many(g, &RuleFilter::default())
                .await
                .expect("cleanup");
        }
    }
}
