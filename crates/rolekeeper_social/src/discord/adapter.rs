//! Platform traits implemented over serenity's HTTP client and cache.

use crate::{
    ChannelLookup, EmojiLookup, MemberLookup, PlatformError, PlatformErrorKind, PlatformResult,
    ReactionHydrator, RoleGranter, RoleLookup,
};
use futures::TryStreamExt;
use rolekeeper_core::{ChannelInfo, EmojiInfo, MemberInfo, ReactionEvent, RoleInfo};
use serenity::all::{
    Cache, ChannelId, Context, GuildId, Http, HttpError, Member, MessageId, RoleId, UserId,
};
use serenity::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Parse a snowflake id, rejecting zero and non-numeric input.
fn parse_id(raw: &str) -> PlatformResult<u64> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .ok_or_else(|| PlatformError::new(PlatformErrorKind::InvalidId(raw.to_string())))
}

pub(crate) fn guild_id(raw: &str) -> PlatformResult<GuildId> {
    parse_id(raw).map(GuildId::new)
}

fn user_id(raw: &str) -> PlatformResult<UserId> {
    parse_id(raw).map(UserId::new)
}

fn role_id(raw: &str) -> PlatformResult<RoleId> {
    parse_id(raw).map(RoleId::new)
}

fn channel_id(raw: &str) -> PlatformResult<ChannelId> {
    parse_id(raw).map(ChannelId::new)
}

fn is_not_found(err: &serenity::Error) -> bool {
    matches!(
        err,
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response))
            if response.status_code.as_u16() == 404
    )
}

/// Snapshot a serenity member.
pub(crate) fn member_info(member: &Member) -> MemberInfo {
    MemberInfo {
        id: member.user.id.to_string(),
        username: member.user.name.clone(),
        bot: member.user.bot,
        role_ids: member.roles.iter().map(|role| role.to_string()).collect(),
        manage_roles: member
            .permissions
            .is_some_and(|p| p.manage_roles() || p.administrator()),
    }
}

/// Serenity-backed platform collaborator.
///
/// Reads go to the gateway cache first and fall back to HTTP.
#[derive(Clone)]
pub struct SerenityPlatform {
    http: Arc<Http>,
    cache: Arc<Cache>,
}

impl SerenityPlatform {
    /// Create an adapter over an HTTP client and cache.
    pub fn new(http: Arc<Http>, cache: Arc<Cache>) -> Self {
        Self { http, cache }
    }

    /// Create an adapter sharing the handles of an event context.
    pub fn from_context(ctx: &Context) -> Self {
        Self::new(Arc::clone(&ctx.http), Arc::clone(&ctx.cache))
    }
}

#[async_trait]
impl MemberLookup for SerenityPlatform {
    #[instrument(skip(self))]
    async fn member(&self, guild: &str, member: &str) -> PlatformResult<Option<MemberInfo>> {
        let guild = guild_id(guild)?;
        let user = user_id(member)?;

        let cached = self
            .cache
            .guild(guild)
            .and_then(|g| g.members.get(&user).map(member_info));
        if cached.is_some() {
            return Ok(cached);
        }

        match guild.member(&self.http, user).await {
            Ok(member) => Ok(Some(member_info(&member))),
            Err(e) if is_not_found(&e) => {
                debug!("Member not in guild");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn members(&self, guild: &str) -> PlatformResult<Vec<MemberInfo>> {
        let guild = guild_id(guild)?;
        let members: Vec<Member> = guild
            .members_iter(Arc::clone(&self.http))
            .try_collect()
            .await?;
        debug!(count = members.len(), "Fetched guild members");
        Ok(members.iter().map(member_info).collect())
    }

    #[instrument(skip(self))]
    async fn search_members(
        &self,
        guild: &str,
        prefix: &str,
        limit: usize,
    ) -> PlatformResult<Vec<MemberInfo>> {
        let guild = guild_id(guild)?;

        // The search endpoint rejects an empty query.
        if prefix.is_empty() {
            return Ok(self
                .cache
                .guild(guild)
                .map(|g| g.members.values().take(limit).map(member_info).collect())
                .unwrap_or_default());
        }

        let members = guild
            .search_members(&self.http, prefix, u64::try_from(limit).ok())
            .await?;
        debug!(count = members.len(), "Searched guild members");
        Ok(members.iter().map(member_info).collect())
    }
}

#[async_trait]
impl RoleLookup for SerenityPlatform {
    #[instrument(skip(self))]
    async fn roles(&self, guild: &str) -> PlatformResult<Vec<RoleInfo>> {
        let guild = guild_id(guild)?;
        let to_info = |id: &RoleId, name: &str| RoleInfo {
            id: id.to_string(),
            name: name.to_string(),
        };

        let cached: Option<Vec<RoleInfo>> = self.cache.guild(guild).map(|g| {
            g.roles
                .iter()
                .map(|(id, role)| to_info(id, &role.name))
                .collect()
        });
        if let Some(roles) = cached {
            return Ok(roles);
        }

        let roles = guild.roles(&self.http).await?;
        Ok(roles
            .iter()
            .map(|(id, role)| to_info(id, &role.name))
            .collect())
    }
}

#[async_trait]
impl ChannelLookup for SerenityPlatform {
    #[instrument(skip(self))]
    async fn channels(&self, guild: &str) -> PlatformResult<Vec<ChannelInfo>> {
        let guild = guild_id(guild)?;
        let mut channels: Vec<_> = guild.channels(&self.http).await?.into_values().collect();
        channels.sort_by_key(|channel| (channel.position, channel.id));

        Ok(channels
            .iter()
            .map(|channel| ChannelInfo {
                id: channel.id.to_string(),
                name: channel.name.clone(),
                text_based: channel.is_text_based(),
            })
            .collect())
    }

    #[instrument(skip(self, content))]
    async fn send_message(&self, channel: &str, content: &str) -> PlatformResult<()> {
        channel_id(channel)?.say(&self.http, content).await?;
        Ok(())
    }
}

#[async_trait]
impl EmojiLookup for SerenityPlatform {
    #[instrument(skip(self))]
    async fn emojis(&self, guild: &str) -> PlatformResult<Vec<EmojiInfo>> {
        let guild = guild_id(guild)?;
        Ok(guild
            .emojis(&self.http)
            .await?
            .into_iter()
            .map(|emoji| EmojiInfo {
                id: emoji.id.to_string(),
                name: emoji.name,
                animated: emoji.animated,
            })
            .collect())
    }
}

#[async_trait]
impl RoleGranter for SerenityPlatform {
    #[instrument(skip(self))]
    async fn grant_role(
        &self,
        guild: &str,
        member: &str,
        role: &str,
        reason: &str,
    ) -> PlatformResult<()> {
        self.http
            .add_member_role(guild_id(guild)?, user_id(member)?, role_id(role)?, Some(reason))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ReactionHydrator for SerenityPlatform {
    #[instrument(skip(self, event), fields(message_id = %event.message_id))]
    async fn hydrate(&self, mut event: ReactionEvent) -> PlatformResult<ReactionEvent> {
        let hydration = |e: serenity::Error| {
            PlatformError::new(PlatformErrorKind::Hydration(e.to_string()))
        };

        let message = channel_id(&event.channel_id)?
            .message(&self.http, MessageId::new(parse_id(&event.message_id)?))
            .await
            .map_err(hydration)?;
        let user = user_id(&event.actor.id)?
            .to_user(&self.http)
            .await
            .map_err(hydration)?;

        if event.guild_id.is_none() {
            event.guild_id = message.guild_id.map(|id| id.to_string());
        }
        event.actor.bot = user.bot;
        event.partial = false;
        debug!("Hydrated partial reaction");
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_rejects_zero_and_text() {
        assert_eq!(parse_id("123").unwrap(), 123);
        assert!(parse_id("0").is_err());
        assert!(parse_id("all").is_err());
        assert!(parse_id("").is_err());
    }

    #[test]
    fn test_member_info_snapshot() {
        let mut member = Member::default();
        member.user.id = UserId::new(7);
        member.user.name = "ada".to_string();
        member.roles = vec![RoleId::new(11)];
        member.permissions = Some(serenity::all::Permissions::MANAGE_ROLES);

        let info = member_info(&member);

        assert_eq!(info.id, "7");
        assert_eq!(info.username, "ada");
        assert!(info.has_role("11"));
        assert!(info.manage_roles);
        assert!(!info.bot);
    }
}
