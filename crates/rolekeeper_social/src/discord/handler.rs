//! Serenity event handler wiring gateway events to the engine.

use super::SerenityPlatform;
use super::adapter::guild_id;
use super::interactions::{
    InteractionResponder, command_definitions, grant_options, invocation, rule_options,
};
use crate::{
    AuditSink, Autocomplete, BulkGrantWorkflow, CONFIGURE_ROLES, EngineSettings, GIVE_ROLE,
    LIST_ROLES, PlatformResult, REMOVE_ROLE, ReactionReconciler, RoleCommands, RuleResolver,
};
use rolekeeper_core::{ReactionActor, ReactionEvent};
use rolekeeper_database::RuleStore;
use serenity::all::{
    Command, CommandInteraction, Context, CreateAutocompleteResponse, CreateInteractionResponse,
    GatewayIntents, GuildId, Interaction, Reaction, ReactionType, Ready,
};
use serenity::async_trait;
use serenity::client::EventHandler;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Emoji identity: custom emoji id, or the character for standard emoji.
fn emoji_identity(emoji: &ReactionType) -> Option<String> {
    match emoji {
        ReactionType::Custom { id, .. } => Some(id.to_string()),
        ReactionType::Unicode(character) => Some(character.clone()),
        _ => None,
    }
}

/// Event handler for the Rolekeeper bot.
///
/// Builds the engine components per event from the context's HTTP client
/// and cache. Each event runs in its own failure boundary.
pub struct RolekeeperHandler {
    store: Arc<dyn RuleStore>,
    settings: EngineSettings,
    development_guild: Option<GuildId>,
}

impl RolekeeperHandler {
    /// Create a handler.
    ///
    /// With a `development_guild`, commands are registered on that guild only.
    ///
    /// # Errors
    ///
    /// Returns `InvalidId` if `development_guild` is not a guild id.
    pub fn new(
        store: Arc<dyn RuleStore>,
        settings: EngineSettings,
        development_guild: Option<&str>,
    ) -> PlatformResult<Self> {
        Ok(Self {
            store,
            settings,
            development_guild: development_guild.map(guild_id).transpose()?,
        })
    }

    /// Required gateway intents for the bot.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MEMBERS
            | GatewayIntents::GUILD_MESSAGE_REACTIONS
            | GatewayIntents::GUILD_MESSAGES
    }

    fn platform(ctx: &Context) -> Arc<SerenityPlatform> {
        Arc::new(SerenityPlatform::from_context(ctx))
    }

    fn audit(&self, platform: &Arc<SerenityPlatform>) -> AuditSink<SerenityPlatform> {
        AuditSink::new(Arc::clone(platform), &self.settings.audit_channel_aliases)
    }

    fn commands(&self, ctx: &Context) -> RoleCommands<dyn RuleStore, SerenityPlatform> {
        let platform = Self::platform(ctx);
        RoleCommands::new(
            Arc::clone(&self.store),
            Arc::clone(&platform),
            self.audit(&platform),
            BulkGrantWorkflow::new(Arc::clone(&platform), self.settings.progress_interval),
        )
    }

    #[instrument(skip_all, fields(command = %command.data.name))]
    async fn run_command(&self, ctx: &Context, command: CommandInteraction) {
        let commands = self.commands(ctx);
        let invoker = invocation(&command);
        let name = command.data.name.clone();
        let rules = rule_options(&command);
        let grant = grant_options(&command);
        let responder = InteractionResponder::new(Arc::clone(&ctx.http), command);

        let outcome = match name.as_str() {
            CONFIGURE_ROLES => commands.configure_roles(&invoker, &rules, &responder).await,
            REMOVE_ROLE => commands.remove_role(&invoker, &rules, &responder).await,
            LIST_ROLES => commands.list_roles(&invoker, &responder).await,
            GIVE_ROLE => commands.give_role(&invoker, &grant, &responder).await,
            other => {
                warn!(command = other, "Unknown command");
                return;
            }
        };
        debug!(?outcome, "Command finished");
    }

    #[instrument(skip_all, fields(command = %command.data.name))]
    async fn run_autocomplete(&self, ctx: &Context, command: CommandInteraction) {
        let Some(guild) = command.guild_id else {
            return;
        };
        let Some(focused) = command.data.autocomplete() else {
            return;
        };

        let completer = Autocomplete::new(Self::platform(ctx), self.settings.max_choices);
        let choices = completer
            .suggest(&guild.to_string(), focused.name, focused.value)
            .await;

        let response = choices
            .into_iter()
            .fold(CreateAutocompleteResponse::new(), |response, choice| {
                response.add_string_choice(choice.name, choice.value)
            });
        if let Err(e) = command
            .create_response(&ctx.http, CreateInteractionResponse::Autocomplete(response))
            .await
        {
            warn!(error = %e, "Failed to send autocomplete choices");
        }
    }
}

#[async_trait]
impl EventHandler for RolekeeperHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, guilds = ready.guilds.len(), "Bot connected");

        let registered = match self.development_guild {
            Some(guild) => guild
                .set_commands(&ctx.http, command_definitions())
                .await
                .map(|commands| commands.len()),
            None => Command::set_global_commands(&ctx.http, command_definitions())
                .await
                .map(|commands| commands.len()),
        };

        match registered {
            Ok(count) => info!(count, "Registered slash commands"),
            Err(e) => error!(error = %e, "Failed to register slash commands"),
        }
    }

    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        let Some(user_id) = reaction.user_id else {
            debug!("Reaction without user");
            return;
        };
        let Some(emoji_id) = emoji_identity(&reaction.emoji) else {
            debug!("Unsupported reaction emoji");
            return;
        };

        let event = ReactionEvent {
            guild_id: reaction.guild_id.map(|id| id.to_string()),
            channel_id: reaction.channel_id.to_string(),
            message_id: reaction.message_id.to_string(),
            emoji_id,
            actor: ReactionActor {
                id: user_id.to_string(),
                bot: reaction.member.as_ref().is_some_and(|m| m.user.bot),
            },
            partial: reaction.member.is_none(),
        };

        let platform = Self::platform(&ctx);
        let reconciler = ReactionReconciler::new(
            RuleResolver::new(Arc::clone(&self.store)),
            Arc::clone(&platform),
            self.audit(&platform),
        );
        let result = reconciler.handle(event).await;
        debug!(?result, "Reaction handled");
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(command) => self.run_command(&ctx, command).await,
            Interaction::Autocomplete(command) => self.run_autocomplete(&ctx, command).await,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenity::all::EmojiId;

    #[test]
    fn test_emoji_identity() {
        let custom = ReactionType::Custom {
            animated: false,
            id: EmojiId::new(42),
            name: Some("party".to_string()),
        };
        assert_eq!(emoji_identity(&custom).as_deref(), Some("42"));

        let unicode = ReactionType::Unicode("🎉".to_string());
        assert_eq!(emoji_identity(&unicode).as_deref(), Some("🎉"));
    }
}
