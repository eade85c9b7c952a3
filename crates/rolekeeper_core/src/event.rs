//! Transient events flowing through the engine.

use serde::{Deserialize, Serialize};

/// The account that added a reaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionActor {
    /// User id of the reacting account.
    pub id: String,
    /// True for automated (bot) accounts.
    pub bot: bool,
}

/// A "reaction added" event as delivered by the platform.
///
/// # Examples
///
/// ```
/// use rolekeeper_core::{ReactionActor, ReactionEvent};
///
/// let event = ReactionEvent {
///     guild_id: Some("g1".to_string()),
///     channel_id: "c1".to_string(),
///     message_id: "m1".to_string(),
///     emoji_id: "🎉".to_string(),
///     actor: ReactionActor { id: "u1".to_string(), bot: false },
///     partial: false,
/// };
/// assert!(!event.partial);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionEvent {
    /// Guild of the message; absent for direct messages or unhydrated payloads.
    pub guild_id: Option<String>,
    /// Channel holding the message.
    pub channel_id: String,
    /// Message the reaction was added to.
    pub message_id: String,
    /// Custom emoji id, or the unicode character for standard emoji.
    pub emoji_id: String,
    /// Who reacted.
    pub actor: ReactionActor,
    /// Set when the payload arrived incompletely loaded.
    pub partial: bool,
}

/// A sensitive action reported to the guild's moderation channel.
///
/// Fire-and-forget: never retried, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[display("{}", action_description)]
pub struct ModerationEvent {
    /// User id of the actor that caused the event.
    pub actor_id: String,
    /// Human-readable description posted to the channel.
    pub action_description: String,
}

impl ModerationEvent {
    /// Create a new moderation event.
    pub fn new(actor_id: impl Into<String>, action_description: impl Into<String>) -> Self {
        Self {
            actor_id: actor_id.into(),
            action_description: action_description.into(),
        }
    }
}
