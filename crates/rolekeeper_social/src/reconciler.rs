//! Granting roles in response to reactions.

use crate::{AuditSink, Platform, PlatformError, RuleResolver};
use rolekeeper_core::{MemberInfo, ModerationEvent, ReactionEvent, RoleRule};
use rolekeeper_database::RuleStore;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Audit-log reason attached to reaction grants.
const REACTION_GRANT_REASON: &str = "Reaction role";

/// How a reaction event was handled.
///
/// The reconciler never surfaces errors; this value records why an event did
/// or did not lead to grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// The reacting account is a bot.
    IgnoredBot,
    /// The partial payload could not be completed.
    Abandoned,
    /// The reaction is not inside a guild.
    NotInGuild,
    /// No rule matches the message and emoji.
    NoMatchingRules,
    /// The reacting account is no longer a guild member.
    MemberUnavailable,
    /// Rule or member lookup failed.
    LookupFailed,
    /// Matching rules were evaluated.
    Applied {
        /// Roles newly granted.
        granted: Vec<String>,
        /// Roles the member already held; no call was made.
        already_held: Vec<String>,
        /// Roles whose grant failed.
        failed: Vec<String>,
    },
}

/// Grants every role whose rule matches a reaction.
///
/// Idempotent: roles the member already holds are skipped, so replaying an
/// event leaves membership unchanged. A failing grant never prevents the
/// remaining matches from being attempted.
pub struct ReactionReconciler<S: ?Sized, P> {
    resolver: RuleResolver<S>,
    platform: Arc<P>,
    audit: AuditSink<P>,
}

impl<S: RuleStore + ?Sized, P: Platform> ReactionReconciler<S, P> {
    /// Create a reconciler.
    pub fn new(resolver: RuleResolver<S>, platform: Arc<P>, audit: AuditSink<P>) -> Self {
        Self {
            resolver,
            platform,
            audit,
        }
    }

    /// Handle one "reaction added" event.
    #[instrument(
        skip(self, event),
        fields(
            message_id = %event.message_id,
            emoji = %event.emoji_id,
            user_id = %event.actor.id,
        )
    )]
    pub async fn handle(&self, event: ReactionEvent) -> Reconciliation {
        if event.actor.bot {
            debug!("Ignoring reaction from bot account");
            return Reconciliation::IgnoredBot;
        }

        let event = if event.partial {
            match self.platform.hydrate(event).await {
                Ok(complete) if complete.actor.bot => {
                    debug!("Ignoring hydrated reaction from bot account");
                    return Reconciliation::IgnoredBot;
                }
                Ok(complete) => complete,
                Err(e) => {
                    warn!(error = %e, "Failed to complete partial reaction, dropping event");
                    return Reconciliation::Abandoned;
                }
            }
        } else {
            event
        };

        let Some(guild_id) = event.guild_id.clone() else {
            debug!("Reaction outside a guild");
            return Reconciliation::NotInGuild;
        };

        let rules = match self
            .resolver
            .resolve(&guild_id, &event.message_id, &event.emoji_id)
            .await
        {
            Ok(rules) => rules,
            Err(e) => {
                error!(guild_id = %guild_id, error = %e, "Failed to resolve reaction rules");
                return Reconciliation::LookupFailed;
            }
        };

        if rules.is_empty() {
            return Reconciliation::NoMatchingRules;
        }

        let member = match self.platform.member(&guild_id, &event.actor.id).await {
            Ok(Some(member)) => member,
            Ok(None) => {
                debug!(guild_id = %guild_id, "Reacting user is not a member");
                return Reconciliation::MemberUnavailable;
            }
            Err(e) => {
                error!(guild_id = %guild_id, error = %e, "Failed to fetch reacting member");
                return Reconciliation::LookupFailed;
            }
        };

        self.apply(&guild_id, member, rules).await
    }

    async fn apply(&self, guild_id: &str, member: MemberInfo, rules: Vec<RoleRule>) -> Reconciliation {
        let mut held: HashSet<String> = member.role_ids.clone();
        let mut granted = Vec::new();
        let mut already_held = Vec::new();
        let mut failed = Vec::new();

        for rule in rules {
            let role_id = rule.role_id().clone();
            if held.contains(&role_id) {
                debug!(role_id = %role_id, "Member already holds role");
                already_held.push(role_id);
                continue;
            }

            match self.grant(guild_id, &member, &role_id).await {
                Ok(()) => {
                    held.insert(role_id.clone());
                    granted.push(role_id);
                }
                Err(e) => {
                    error!(role_id = %role_id, error = %e, "Failed to grant reaction role");
                    failed.push(role_id);
                }
            }
        }

        Reconciliation::Applied {
            granted,
            already_held,
            failed,
        }
    }

    async fn grant(
        &self,
        guild_id: &str,
        member: &MemberInfo,
        role_id: &str,
    ) -> Result<(), PlatformError> {
        self.platform
            .grant_role(guild_id, &member.id, role_id, REACTION_GRANT_REASON)
            .await?;
        info!(role_id, member_id = %member.id, "Granted reaction role");

        let role_name = match self.platform.role(guild_id, role_id).await {
            Ok(Some(role)) => role.name,
            Ok(None) | Err(_) => "unknown role".to_string(),
        };
        let event = ModerationEvent::new(
            member.id.clone(),
            format!("✅ {} received the role {}", member.username, role_name),
        );
        self.audit.notify(Some(guild_id), &event).await;
        Ok(())
    }
}
