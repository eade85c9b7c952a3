//! Best-effort notifications to a guild's moderation channel.

use crate::ChannelLookup;
use rolekeeper_core::{ChannelInfo, ModerationEvent};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// What happened to a notification.
///
/// Informational only; no caller is expected to act on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditDelivery {
    /// Posted to the named channel.
    Delivered {
        /// Channel that received the message.
        channel_id: String,
    },
    /// No guild was available to look in.
    NoGuild,
    /// The guild has no channel with a moderation name, or it is not text-based.
    NoChannel,
    /// The lookup or the send failed; the failure was swallowed.
    Failed,
}

/// Posts moderation events to the first channel named like a moderation log.
///
/// Never fails its caller. Audit visibility must not block the primary
/// workflow, so lookups and sends that fail are logged and dropped.
pub struct AuditSink<C> {
    channels: Arc<C>,
    aliases: Vec<String>,
}

impl<C> Clone for AuditSink<C> {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
            aliases: self.aliases.clone(),
        }
    }
}

impl<C: ChannelLookup> AuditSink<C> {
    /// Create a sink recognising `aliases` as moderation channel names.
    pub fn new(channels: Arc<C>, aliases: &[String]) -> Self {
        Self {
            channels,
            aliases: aliases.iter().map(|a| a.to_lowercase()).collect(),
        }
    }

    fn find_channel<'a>(&self, channels: &'a [ChannelInfo]) -> Option<&'a ChannelInfo> {
        channels
            .iter()
            .find(|channel| self.aliases.contains(&channel.name.to_lowercase()))
    }

    /// Post `event` to the guild's moderation channel, if it has one.
    #[instrument(skip(self, event), fields(actor_id = %event.actor_id))]
    pub async fn notify(&self, guild_id: Option<&str>, event: &ModerationEvent) -> AuditDelivery {
        let Some(guild_id) = guild_id else {
            debug!("No guild to notify");
            return AuditDelivery::NoGuild;
        };

        let channels = match self.channels.channels(guild_id).await {
            Ok(channels) => channels,
            Err(e) => {
                warn!(error = %e, "Failed to list channels for audit notification");
                return AuditDelivery::Failed;
            }
        };

        let Some(channel) = self.find_channel(&channels) else {
            debug!("Guild has no moderation channel");
            return AuditDelivery::NoChannel;
        };

        if !channel.text_based {
            debug!(channel_id = %channel.id, "Moderation channel cannot receive messages");
            return AuditDelivery::NoChannel;
        }

        match self
            .channels
            .send_message(&channel.id, &event.action_description)
            .await
        {
            Ok(()) => {
                debug!(channel_id = %channel.id, "Posted audit notification");
                AuditDelivery::Delivered {
                    channel_id: channel.id.clone(),
                }
            }
            Err(e) => {
                warn!(channel_id = %channel.id, error = %e, "Failed to post audit notification");
                AuditDelivery::Failed
            }
        }
    }
}
