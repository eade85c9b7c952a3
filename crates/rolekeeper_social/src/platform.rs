//! Narrow interfaces onto the chat platform.
//!
//! The engine never touches an SDK client directly. Each concern the engine
//! needs is a small trait keyed by identity strings, so the whole engine can
//! run against in-memory fakes.

use crate::PlatformResult;
use async_trait::async_trait;
use rolekeeper_core::{ChannelInfo, EmojiInfo, MemberInfo, ReactionEvent, RoleInfo};

/// Read access to guild members.
#[async_trait]
pub trait MemberLookup: Send + Sync {
    /// A single member, or `None` if they are not in the guild.
    async fn member(&self, guild_id: &str, member_id: &str) -> PlatformResult<Option<MemberInfo>>;

    /// The full membership of a guild, fetched as one bulk read.
    async fn members(&self, guild_id: &str) -> PlatformResult<Vec<MemberInfo>>;

    /// At most `limit` members whose name starts with `prefix`.
    ///
    /// Never enumerates the guild.
    async fn search_members(
        &self,
        guild_id: &str,
        prefix: &str,
        limit: usize,
    ) -> PlatformResult<Vec<MemberInfo>>;
}

/// Read access to guild roles.
#[async_trait]
pub trait RoleLookup: Send + Sync {
    /// Every role of the guild.
    async fn roles(&self, guild_id: &str) -> PlatformResult<Vec<RoleInfo>>;

    /// A single role, or `None` if the guild has no such role.
    async fn role(&self, guild_id: &str, role_id: &str) -> PlatformResult<Option<RoleInfo>> {
        Ok(self
            .roles(guild_id)
            .await?
            .into_iter()
            .find(|role| role.id == role_id))
    }
}

/// Guild channels and message delivery.
#[async_trait]
pub trait ChannelLookup: Send + Sync {
    /// Channels of the guild in display order.
    async fn channels(&self, guild_id: &str) -> PlatformResult<Vec<ChannelInfo>>;

    /// Post `content` to a channel.
    async fn send_message(&self, channel_id: &str, content: &str) -> PlatformResult<()>;
}

/// Custom emojis of a guild.
#[async_trait]
pub trait EmojiLookup: Send + Sync {
    /// Every custom emoji of the guild.
    async fn emojis(&self, guild_id: &str) -> PlatformResult<Vec<EmojiInfo>>;
}

/// Role membership mutation.
#[async_trait]
pub trait RoleGranter: Send + Sync {
    /// Add `role_id` to a member. `reason` lands in the platform audit log.
    async fn grant_role(
        &self,
        guild_id: &str,
        member_id: &str,
        role_id: &str,
        reason: &str,
    ) -> PlatformResult<()>;
}

/// Completion of partially delivered reaction events.
#[async_trait]
pub trait ReactionHydrator: Send + Sync {
    /// Fetch whatever the partial event is missing and return it complete.
    async fn hydrate(&self, event: ReactionEvent) -> PlatformResult<ReactionEvent>;
}

/// Every collaborator the engine uses, implemented by one platform adapter.
pub trait Platform:
    MemberLookup + RoleLookup + ChannelLookup + EmojiLookup + RoleGranter + ReactionHydrator
{
}

impl<T> Platform for T where
    T: MemberLookup + RoleLookup + ChannelLookup + EmojiLookup + RoleGranter + ReactionHydrator
{
}
