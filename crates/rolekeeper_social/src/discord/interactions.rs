//! Slash command definitions and reply delivery.

use super::adapter::member_info;
use crate::{
    CONFIGURE_ROLES, CommandResponder, GIVE_ROLE, GrantOptions, Invocation, LIST_ROLES,
    PlatformResult, REMOVE_ROLE, RuleOptions,
};
use serenity::all::{
    CommandInteraction, CommandOptionType, CreateCommand, CreateCommandOption,
    CreateInteractionResponse, CreateInteractionResponseMessage, EditInteractionResponse, Http,
    Permissions,
};
use serenity::async_trait;
use std::sync::Arc;

fn role_option(required: bool) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::String, "cargo", "Role to use.")
        .required(required)
        .set_autocomplete(true)
}

fn emoji_option(required: bool) -> CreateCommandOption {
    CreateCommandOption::new(
        CommandOptionType::String,
        "emoji",
        "Emoji that triggers the role, or `any`.",
    )
    .required(required)
    .set_autocomplete(true)
}

fn message_option(required: bool) -> CreateCommandOption {
    CreateCommandOption::new(
        CommandOptionType::String,
        "message-id",
        "ID of the message users react to.",
    )
    .required(required)
}

fn operator_command(name: &str, description: &str) -> CreateCommand {
    CreateCommand::new(name)
        .description(description)
        .default_member_permissions(Permissions::MANAGE_ROLES)
        .dm_permission(false)
}

/// Definitions of every operator command, ready for registration.
pub fn command_definitions() -> Vec<CreateCommand> {
    vec![
        operator_command(
            CONFIGURE_ROLES,
            "Configure a role to be given when users react to a message.",
        )
        .add_option(role_option(true))
        .add_option(emoji_option(true))
        .add_option(message_option(true)),
        operator_command(
            REMOVE_ROLE,
            "Remove configured roles by role, emoji or message ID.",
        )
        .add_option(role_option(false))
        .add_option(emoji_option(false))
        .add_option(message_option(false)),
        operator_command(LIST_ROLES, "List every configured reaction role."),
        operator_command(GIVE_ROLE, "Give a role to a member, or to everyone with `all`.")
            .add_option(role_option(true))
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "member",
                    "Member to receive the role, or `all`.",
                )
                .required(true)
                .set_autocomplete(true),
            ),
    ]
}

/// String value of a top-level option.
fn string_option(command: &CommandInteraction, name: &str) -> Option<String> {
    command
        .data
        .options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_str())
        .map(str::to_string)
}

/// Who invoked `command`.
pub(crate) fn invocation(command: &CommandInteraction) -> Invocation {
    Invocation {
        guild_id: command.guild_id.map(|id| id.to_string()),
        user_id: command.user.id.to_string(),
        username: command.user.name.clone(),
        member: command.member.as_deref().map(member_info),
    }
}

/// Rule options of `command`.
pub(crate) fn rule_options(command: &CommandInteraction) -> RuleOptions {
    RuleOptions {
        cargo: string_option(command, "cargo"),
        emoji: string_option(command, "emoji"),
        message_id: string_option(command, "message-id"),
    }
}

/// Grant options of `command`.
pub(crate) fn grant_options(command: &CommandInteraction) -> GrantOptions {
    GrantOptions {
        cargo: string_option(command, "cargo"),
        member: string_option(command, "member"),
    }
}

/// Ephemeral replies to one slash command interaction.
pub struct InteractionResponder {
    http: Arc<Http>,
    command: CommandInteraction,
}

impl InteractionResponder {
    /// Create a responder for `command`.
    pub fn new(http: Arc<Http>, command: CommandInteraction) -> Self {
        Self { http, command }
    }
}

#[async_trait]
impl CommandResponder for InteractionResponder {
    async fn reply(&self, content: &str) -> PlatformResult<()> {
        let message = CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true);
        self.command
            .create_response(&self.http, CreateInteractionResponse::Message(message))
            .await?;
        Ok(())
    }

    async fn defer(&self) -> PlatformResult<()> {
        self.command.defer_ephemeral(&self.http).await?;
        Ok(())
    }

    async fn edit(&self, content: &str) -> PlatformResult<()> {
        self.command
            .edit_response(&self.http, EditInteractionResponse::new().content(content))
            .await?;
        Ok(())
    }
}
