//! Operator slash commands for managing reaction roles.
//!
//! Every command follows the same shape: the [`AccessGuard`] check runs
//! first, a denial is reported to the [`AuditSink`] and answered directly,
//! and an authorized invocation is deferred, run inside its own failure
//! boundary, and answered by editing the deferred reply.

use crate::{
    AccessGuard, AuditSink, BulkGrantWorkflow, CommandError, CommandErrorKind, CommandResult,
    GrantProgress, MemberGrant, Platform, PlatformResult,
};
use async_trait::async_trait;
use rolekeeper_core::{
    EmojiInfo, EmojiMatch, GrantTarget, MemberInfo, ModerationEvent, RoleInfo, RoleRule,
    RuleFilter,
};
use rolekeeper_database::{RuleCreation, RuleStore};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Name of the rule creation command.
pub const CONFIGURE_ROLES: &str = "configure-roles";
/// Name of the rule removal command.
pub const REMOVE_ROLE: &str = "remove-role";
/// Name of the rule listing command.
pub const LIST_ROLES: &str = "list-roles";
/// Name of the role grant command.
pub const GIVE_ROLE: &str = "give-role";

/// Who invoked a command, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Guild the command was used in, if any.
    pub guild_id: Option<String>,
    /// User id of the invoking account.
    pub user_id: String,
    /// Username of the invoking account, used in audit messages.
    pub username: String,
    /// The invoker as a guild member, when the platform provided one.
    pub member: Option<MemberInfo>,
}

/// Options shared by the rule commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOptions {
    /// Role id.
    pub cargo: Option<String>,
    /// Emoji identity or `any`.
    pub emoji: Option<String>,
    /// Target message id.
    pub message_id: Option<String>,
}

/// Options of the grant command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantOptions {
    /// Role id.
    pub cargo: Option<String>,
    /// Member id, or `all` for every member.
    pub member: Option<String>,
}

/// Delivers replies to the invoking actor only.
#[async_trait]
pub trait CommandResponder: Send + Sync {
    /// Answer the invocation immediately.
    async fn reply(&self, content: &str) -> PlatformResult<()>;

    /// Acknowledge the invocation and answer later.
    async fn defer(&self) -> PlatformResult<()>;

    /// Replace the deferred answer.
    async fn edit(&self, content: &str) -> PlatformResult<()>;
}

/// How a command invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command did its job and the actor got the result.
    Completed,
    /// The command stopped early; the actor got the reply for this kind.
    Rejected(CommandErrorKind),
}

/// Progress of a bulk grant, reported by editing the deferred reply.
struct ResponderProgress<'a> {
    responder: &'a dyn CommandResponder,
}

#[async_trait]
impl GrantProgress for ResponderProgress<'_> {
    async fn acknowledged(&self) {
        if let Err(e) = self
            .responder
            .edit("⏳ Adding the role to every member... this may take a while.")
            .await
        {
            warn!(error = %e, "Failed to acknowledge bulk grant");
        }
    }

    async fn progress(&self, successes: usize) {
        info!(successes, "Bulk grant progress");
        if let Err(e) = self
            .responder
            .edit(&format!("⏳ Processing... {} members updated.", successes))
            .await
        {
            warn!(error = %e, "Failed to report bulk grant progress");
        }
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> CommandResult<&'a str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CommandError::new(CommandErrorKind::MissingOption(name.to_string())))
}

fn role_name(roles: &[RoleInfo], role_id: &str) -> String {
    roles
        .iter()
        .find(|role| role.id == role_id)
        .map(|role| role.name.clone())
        .unwrap_or_else(|| "unknown role".to_string())
}

fn render_emoji(emoji: &EmojiMatch, emojis: &[EmojiInfo]) -> String {
    match emoji {
        EmojiMatch::Any => emoji.to_string(),
        EmojiMatch::Exact(id) => emojis
            .iter()
            .find(|e| &e.id == id)
            .map(EmojiInfo::mention)
            .unwrap_or_else(|| id.clone()),
    }
}

/// The operator command set.
pub struct RoleCommands<S: ?Sized, P> {
    store: Arc<S>,
    platform: Arc<P>,
    guard: AccessGuard,
    audit: AuditSink<P>,
    bulk: BulkGrantWorkflow<P>,
}

impl<S: RuleStore + ?Sized, P: Platform> RoleCommands<S, P> {
    /// Create the command set.
    pub fn new(
        store: Arc<S>,
        platform: Arc<P>,
        audit: AuditSink<P>,
        bulk: BulkGrantWorkflow<P>,
    ) -> Self {
        Self {
            store,
            platform,
            guard: AccessGuard,
            audit,
            bulk,
        }
    }

    /// `configure-roles`: bind a reaction on a message to a role.
    #[instrument(skip_all, fields(user_id = %invocation.user_id))]
    pub async fn configure_roles(
        &self,
        invocation: &Invocation,
        options: &RuleOptions,
        responder: &dyn CommandResponder,
    ) -> CommandOutcome {
        let Some(guild_id) = self.authorize(CONFIGURE_ROLES, invocation, responder).await else {
            return CommandOutcome::Rejected(CommandErrorKind::AccessDenied);
        };
        self.defer(responder).await;
        let result = self.create_rule(guild_id, invocation, options).await;
        self.finish(CONFIGURE_ROLES, result, responder).await
    }

    /// `remove-role`: delete every rule matching the given options.
    #[instrument(skip_all, fields(user_id = %invocation.user_id))]
    pub async fn remove_role(
        &self,
        invocation: &Invocation,
        options: &RuleOptions,
        responder: &dyn CommandResponder,
    ) -> CommandOutcome {
        let Some(guild_id) = self.authorize(REMOVE_ROLE, invocation, responder).await else {
            return CommandOutcome::Rejected(CommandErrorKind::AccessDenied);
        };
        self.defer(responder).await;
        let result = self.delete_rules(guild_id, invocation, options).await;
        self.finish(REMOVE_ROLE, result, responder).await
    }

    /// `list-roles`: show every rule of the guild.
    #[instrument(skip_all, fields(user_id = %invocation.user_id))]
    pub async fn list_roles(
        &self,
        invocation: &Invocation,
        responder: &dyn CommandResponder,
    ) -> CommandOutcome {
        let Some(guild_id) = self.authorize(LIST_ROLES, invocation, responder).await else {
            return CommandOutcome::Rejected(CommandErrorKind::AccessDenied);
        };
        self.defer(responder).await;
        let result = self.render_rules(guild_id).await;
        self.finish(LIST_ROLES, result, responder).await
    }

    /// `give-role`: grant a role to one member or, with `all`, to everyone.
    #[instrument(skip_all, fields(user_id = %invocation.user_id))]
    pub async fn give_role(
        &self,
        invocation: &Invocation,
        options: &GrantOptions,
        responder: &dyn CommandResponder,
    ) -> CommandOutcome {
        let Some(guild_id) = self.authorize(GIVE_ROLE, invocation, responder).await else {
            return CommandOutcome::Rejected(CommandErrorKind::AccessDenied);
        };
        self.defer(responder).await;
        let result = self.grant(guild_id, invocation, options, responder).await;
        self.finish(GIVE_ROLE, result, responder).await
    }

    /// Returns the guild id when the invoker may run `command`.
    async fn authorize<'a>(
        &self,
        command: &str,
        invocation: &'a Invocation,
        responder: &dyn CommandResponder,
    ) -> Option<&'a str> {
        let guild_id = invocation.guild_id.as_deref();
        if self
            .guard
            .can_manage_roles(guild_id, invocation.member.as_ref())
        {
            return guild_id;
        }

        warn!(command, username = %invocation.username, "Command denied");
        let event = ModerationEvent::new(
            invocation.user_id.clone(),
            format!(
                "{} attempted /{} without permission",
                invocation.username, command
            ),
        );
        self.audit.notify(guild_id, &event).await;

        let reply = CommandErrorKind::AccessDenied.user_message();
        if let Err(e) = responder.reply(&reply).await {
            warn!(error = %e, "Failed to send denial reply");
        }
        None
    }

    async fn defer(&self, responder: &dyn CommandResponder) {
        if let Err(e) = responder.defer().await {
            warn!(error = %e, "Failed to defer reply");
        }
    }

    async fn finish(
        &self,
        command: &str,
        result: CommandResult<String>,
        responder: &dyn CommandResponder,
    ) -> CommandOutcome {
        let (content, outcome) = match result {
            Ok(content) => (content, CommandOutcome::Completed),
            Err(e) => {
                if e.kind().is_unexpected() {
                    error!(command, error = %e, "Command failed");
                } else {
                    debug!(command, kind = %e.kind(), "Command stopped");
                }
                (
                    e.kind().user_message(),
                    CommandOutcome::Rejected(e.kind().clone()),
                )
            }
        };

        if let Err(e) = responder.edit(&content).await {
            warn!(command, error = %e, "Failed to deliver command reply");
        }
        outcome
    }

    async fn existing_role(&self, guild_id: &str, role_id: &str) -> CommandResult<RoleInfo> {
        self.platform
            .role(guild_id, role_id)
            .await?
            .ok_or_else(|| CommandError::new(CommandErrorKind::RoleNotFound(role_id.to_string())))
    }

    async fn create_rule(
        &self,
        guild_id: &str,
        invocation: &Invocation,
        options: &RuleOptions,
    ) -> CommandResult<String> {
        let role_id = required(&options.cargo, "cargo")?;
        let emoji = EmojiMatch::parse(required(&options.emoji, "emoji")?)
            .ok_or_else(|| CommandError::new(CommandErrorKind::MissingOption("emoji".into())))?;
        let message_id = required(&options.message_id, "message-id")?;

        let role = self.existing_role(guild_id, role_id).await?;
        let rule = RoleRule::new(guild_id, role_id, emoji, message_id);

        match self.store.create(rule).await? {
            RuleCreation::Duplicate(_) => Ok("⚠️ Role already configured.".to_string()),
            RuleCreation::Created(rule) => {
                info!(role_id, message_id, "Configured reaction role");
                let event = ModerationEvent::new(
                    invocation.user_id.clone(),
                    format!(
                        "🛠️ {} configured the role {} for {} on message {}",
                        invocation.username,
                        role.name,
                        rule.emoji(),
                        rule.message_id()
                    ),
                );
                self.audit.notify(Some(guild_id), &event).await;
                Ok("✅ Role configured successfully!".to_string())
            }
        }
    }

    async fn delete_rules(
        &self,
        guild_id: &str,
        invocation: &Invocation,
        options: &RuleOptions,
    ) -> CommandResult<String> {
        let filter = RuleFilter::from_options(
            options.cargo.as_deref(),
            options.emoji.as_deref(),
            options.message_id.as_deref(),
        );
        if filter.is_empty() {
            return Err(CommandError::new(CommandErrorKind::EmptyFilter));
        }
        if let Some(role_id) = filter.role_id() {
            self.existing_role(guild_id, role_id).await?;
        }

        let removed = self.store.delete_many(guild_id, &filter).await?;
        if removed == 0 {
            return Err(CommandError::new(CommandErrorKind::NoRulesMatched));
        }

        info!(removed, "Removed reaction role rules");
        let plural = if removed == 1 { "" } else { "s" };
        let event = ModerationEvent::new(
            invocation.user_id.clone(),
            format!(
                "🗑️ {} removed {} reaction role configuration{}",
                invocation.username, removed, plural
            ),
        );
        self.audit.notify(Some(guild_id), &event).await;
        Ok(format!("✅ {} configuration{} removed.", removed, plural))
    }

    async fn render_rules(&self, guild_id: &str) -> CommandResult<String> {
        let rules = self.store.find_many(guild_id, &RuleFilter::default()).await?;
        if rules.is_empty() {
            return Err(CommandError::new(CommandErrorKind::RuleNotFound));
        }

        let roles = self.platform.roles(guild_id).await?;
        let emojis = self.platform.emojis(guild_id).await.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load guild emojis, listing raw ids");
            Vec::new()
        });

        let entries: Vec<String> = rules
            .iter()
            .map(|rule| {
                format!(
                    "\n==========================\nRole: {}\nEmoji: {}\nMessage ID: {}",
                    role_name(&roles, rule.role_id()),
                    render_emoji(rule.emoji(), &emojis),
                    rule.message_id()
                )
            })
            .collect();

        Ok(format!("Configured roles: {}", entries.join("\n")))
    }

    async fn grant(
        &self,
        guild_id: &str,
        invocation: &Invocation,
        options: &GrantOptions,
        responder: &dyn CommandResponder,
    ) -> CommandResult<String> {
        let role_id = required(&options.cargo, "cargo")?;
        let target = GrantTarget::parse(required(&options.member, "member")?);
        let role = self.existing_role(guild_id, role_id).await?;

        match target {
            GrantTarget::Member(member_id) => {
                let (granted, member) =
                    self.bulk.grant_to_member(guild_id, role_id, &member_id).await?;
                let name = member.username;
                match granted {
                    MemberGrant::AlreadyHeld => {
                        Ok(format!("ℹ️ {} already has the role {}.", name, role.name))
                    }
                    MemberGrant::Granted => {
                        let event = ModerationEvent::new(
                            invocation.user_id.clone(),
                            format!(
                                "✅ {} gave the role {} to {}",
                                invocation.username, role.name, name
                            ),
                        );
                        self.audit.notify(Some(guild_id), &event).await;
                        Ok(format!("✅ Role {} given to {}.", role.name, name))
                    }
                }
            }
            GrantTarget::AllMembers => {
                let progress = ResponderProgress { responder };
                let report = self.bulk.grant_to_all(guild_id, role_id, &progress).await?;
                let event = ModerationEvent::new(
                    invocation.user_id.clone(),
                    format!(
                        "✅ {} gave the role {} to every member ({} succeeded, {} failed)",
                        invocation.username, role.name, report.success_count, report.failure_count
                    ),
                );
                self.audit.notify(Some(guild_id), &event).await;
                Ok(format!(
                    "✅ Done!\nSucceeded: {} members\nFailed: {} members",
                    report.success_count, report.failure_count
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_blank() {
        assert!(required(&None, "cargo").is_err());
        assert!(required(&Some("   ".to_string()), "cargo").is_err());
        assert_eq!(required(&Some(" r1 ".to_string()), "cargo").unwrap(), "r1");
    }

    #[test]
    fn test_render_emoji_prefers_guild_markup() {
        let emojis = vec![EmojiInfo {
            id: "42".to_string(),
            name: "party".to_string(),
            animated: false,
        }];
        assert_eq!(render_emoji(&EmojiMatch::Any, &emojis), "any");
        assert_eq!(
            render_emoji(&EmojiMatch::Exact("42".to_string()), &emojis),
            "<:party:42>"
        );
        assert_eq!(render_emoji(&EmojiMatch::Exact("🎉".to_string()), &emojis), "🎉");
    }

    #[test]
    fn test_role_name_falls_back() {
        let roles = vec![RoleInfo {
            id: "r1".to_string(),
            name: "Members".to_string(),
        }];
        assert_eq!(role_name(&roles, "r1"), "Members");
        assert_eq!(role_name(&roles, "r2"), "unknown role");
    }
}
