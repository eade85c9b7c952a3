//! Fake chat platform for testing.

use async_trait::async_trait;
use rolekeeper_core::{
    ChannelInfo, EmojiInfo, MemberInfo, MemberInfoBuilder, ReactionEvent, RoleInfo,
};
use rolekeeper_social::{
    ChannelLookup, CommandResponder, EmojiLookup, GrantProgress, MemberLookup, PlatformError,
    PlatformErrorKind, PlatformResult, ReactionHydrator, RoleGranter, RoleLookup,
};
use std::collections::HashSet;
use std::sync::Mutex;

/// A regular member holding `roles`.
pub fn member(id: &str, roles: &[&str]) -> MemberInfo {
    MemberInfoBuilder::default()
        .id(id)
        .username(format!("user-{}", id))
        .role_ids(roles.iter().map(|r| r.to_string()).collect::<HashSet<_>>())
        .build()
        .expect("valid member")
}

/// A member allowed to manage roles.
pub fn admin(id: &str) -> MemberInfo {
    MemberInfoBuilder::default()
        .id(id)
        .username(format!("admin-{}", id))
        .manage_roles(true)
        .build()
        .expect("valid member")
}

/// A text channel named `security`.
pub fn moderation_channel() -> ChannelInfo {
    ChannelInfo {
        id: "audit-channel".to_string(),
        name: "Security".to_string(),
        text_based: true,
    }
}

/// In-memory platform for a single guild.
///
/// Grants mutate the stored members, so repeated lookups observe them.
#[derive(Default)]
pub struct FakePlatform {
    members: Mutex<Vec<MemberInfo>>,
    roles: Vec<RoleInfo>,
    channels: Vec<ChannelInfo>,
    emojis: Vec<EmojiInfo>,
    failing_members: HashSet<String>,
    fail_channel_lookup: bool,
    fail_sends: bool,
    fail_hydration: bool,
    hydrated_guild: Option<String>,
    grants: Mutex<Vec<(String, String)>>,
    sent: Mutex<Vec<(String, String)>>,
    channel_lookups: Mutex<usize>,
    member_lookups: Mutex<usize>,
    member_enumerations: Mutex<usize>,
    member_searches: Mutex<Vec<String>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_members(self, members: Vec<MemberInfo>) -> Self {
        Self {
            members: Mutex::new(members),
            ..self
        }
    }

    pub fn with_role(mut self, id: &str, name: &str) -> Self {
        self.roles.push(RoleInfo {
            id: id.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn with_channel(mut self, channel: ChannelInfo) -> Self {
        self.channels.push(channel);
        self
    }

    pub fn with_emoji(mut self, id: &str, name: &str) -> Self {
        self.emojis.push(EmojiInfo {
            id: id.to_string(),
            name: name.to_string(),
            animated: false,
        });
        self
    }

    /// Grants to `member_id` fail.
    pub fn failing_for(mut self, member_id: &str) -> Self {
        self.failing_members.insert(member_id.to_string());
        self
    }

    pub fn failing_channel_lookup(mut self) -> Self {
        self.fail_channel_lookup = true;
        self
    }

    pub fn failing_sends(mut self) -> Self {
        self.fail_sends = true;
        self
    }

    pub fn failing_hydration(mut self) -> Self {
        self.fail_hydration = true;
        self
    }

    /// Guild filled in when a partial event is hydrated.
    pub fn hydrating_into(mut self, guild_id: &str) -> Self {
        self.hydrated_guild = Some(guild_id.to_string());
        self
    }

    /// Every `(member, role)` grant call, including failed ones.
    pub fn grants(&self) -> Vec<(String, String)> {
        self.grants.lock().unwrap().clone()
    }

    /// Every `(channel, content)` message sent.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// How many times the guild channels were listed.
    pub fn channel_lookups(&self) -> usize {
        *self.channel_lookups.lock().unwrap()
    }

    /// How many single-member lookups were made.
    pub fn member_lookups(&self) -> usize {
        *self.member_lookups.lock().unwrap()
    }

    /// How many times the whole membership was listed.
    pub fn member_enumerations(&self) -> usize {
        *self.member_enumerations.lock().unwrap()
    }

    /// Prefix of every member search, in order.
    pub fn member_searches(&self) -> Vec<String> {
        self.member_searches.lock().unwrap().clone()
    }

    fn failure(detail: &str) -> PlatformError {
        PlatformError::new(PlatformErrorKind::Api(detail.to_string()))
    }
}

#[async_trait]
impl MemberLookup for FakePlatform {
    async fn member(&self, _guild_id: &str, member_id: &str) -> PlatformResult<Option<MemberInfo>> {
        *self.member_lookups.lock().unwrap() += 1;
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == member_id)
            .cloned())
    }

    async fn members(&self, _guild_id: &str) -> PlatformResult<Vec<MemberInfo>> {
        *self.member_enumerations.lock().unwrap() += 1;
        Ok(self.members.lock().unwrap().clone())
    }

    async fn search_members(
        &self,
        _guild_id: &str,
        prefix: &str,
        limit: usize,
    ) -> PlatformResult<Vec<MemberInfo>> {
        self.member_searches.lock().unwrap().push(prefix.to_string());
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.username.starts_with(prefix))
            .take(limit)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl RoleLookup for FakePlatform {
    async fn roles(&self, _guild_id: &str) -> PlatformResult<Vec<RoleInfo>> {
        Ok(self.roles.clone())
    }
}

#[async_trait]
impl ChannelLookup for FakePlatform {
    async fn channels(&self, _guild_id: &str) -> PlatformResult<Vec<ChannelInfo>> {
        *self.channel_lookups.lock().unwrap() += 1;
        if self.fail_channel_lookup {
            return Err(Self::failure("channels unavailable"));
        }
        Ok(self.channels.clone())
    }

    async fn send_message(&self, channel_id: &str, content: &str) -> PlatformResult<()> {
        if self.fail_sends {
            return Err(Self::failure("missing access"));
        }
        self.sent
            .lock()
            .unwrap()
            .push((channel_id.to_string(), content.to_string()));
        Ok(())
    }
}

#[async_trait]
impl EmojiLookup for FakePlatform {
    async fn emojis(&self, _guild_id: &str) -> PlatformResult<Vec<EmojiInfo>> {
        Ok(self.emojis.clone())
    }
}

#[async_trait]
impl RoleGranter for FakePlatform {
    async fn grant_role(
        &self,
        _guild_id: &str,
        member_id: &str,
        role_id: &str,
        _reason: &str,
    ) -> PlatformResult<()> {
        self.grants
            .lock()
            .unwrap()
            .push((member_id.to_string(), role_id.to_string()));

        if self.failing_members.contains(member_id) {
            return Err(Self::failure("missing permissions"));
        }

        let mut members = self.members.lock().unwrap();
        match members.iter_mut().find(|m| m.id == member_id) {
            Some(member) => {
                member.role_ids.insert(role_id.to_string());
                Ok(())
            }
            None => Err(Self::failure("unknown member")),
        }
    }
}

#[async_trait]
impl ReactionHydrator for FakePlatform {
    async fn hydrate(&self, mut event: ReactionEvent) -> PlatformResult<ReactionEvent> {
        if self.fail_hydration {
            return Err(PlatformError::new(PlatformErrorKind::Hydration(
                "unknown message".to_string(),
            )));
        }
        if event.guild_id.is_none() {
            event.guild_id = self.hydrated_guild.clone();
        }
        if let Some(member) = self.member("", &event.actor.id).await? {
            event.actor.bot = member.bot;
        }
        event.partial = false;
        Ok(event)
    }
}

/// Records every reply delivered to the actor.
#[derive(Default)]
pub struct RecordingResponder {
    replies: Mutex<Vec<String>>,
    edits: Mutex<Vec<String>>,
    defers: Mutex<usize>,
}

impl RecordingResponder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replies(&self) -> Vec<String> {
        self.replies.lock().unwrap().clone()
    }

    pub fn edits(&self) -> Vec<String> {
        self.edits.lock().unwrap().clone()
    }

    pub fn defers(&self) -> usize {
        *self.defers.lock().unwrap()
    }

    /// The last edit, which is what the actor finally sees.
    pub fn last_edit(&self) -> Option<String> {
        self.edits.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CommandResponder for RecordingResponder {
    async fn reply(&self, content: &str) -> PlatformResult<()> {
        self.replies.lock().unwrap().push(content.to_string());
        Ok(())
    }

    async fn defer(&self) -> PlatformResult<()> {
        *self.defers.lock().unwrap() += 1;
        Ok(())
    }

    async fn edit(&self, content: &str) -> PlatformResult<()> {
        self.edits.lock().unwrap().push(content.to_string());
        Ok(())
    }
}

/// Records bulk grant progress.
#[derive(Default)]
pub struct RecordingProgress {
    acknowledged: Mutex<usize>,
    updates: Mutex<Vec<usize>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acknowledgements(&self) -> usize {
        *self.acknowledged.lock().unwrap()
    }

    pub fn updates(&self) -> Vec<usize> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl GrantProgress for RecordingProgress {
    async fn acknowledged(&self) {
        *self.acknowledged.lock().unwrap() += 1;
    }

    async fn progress(&self, successes: usize) {
        self.updates.lock().unwrap().push(successes);
    }
}
