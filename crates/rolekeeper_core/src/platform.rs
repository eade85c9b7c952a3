//! Snapshots of platform entities, held by value.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A guild member as seen by the engine.
///
/// # Examples
///
/// ```
/// use rolekeeper_core::MemberInfoBuilder;
///
/// let member = MemberInfoBuilder::default()
///     .id("u1")
///     .username("alice")
///     .role_ids(["r1".to_string()].into_iter().collect::<std::collections::HashSet<String>>())
///     .build()
///     .expect("valid member");
/// assert!(member.has_role("r1"));
/// assert!(!member.bot);
/// assert!(!member.manage_roles);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(setter(into))]
pub struct MemberInfo {
    /// User id.
    pub id: String,
    /// Display username.
    pub username: String,
    /// True for automated (bot) accounts.
    #[builder(default)]
    pub bot: bool,
    /// Roles currently held.
    #[builder(default)]
    pub role_ids: HashSet<String>,
    /// Whether the member holds the role-management capability.
    #[builder(default)]
    pub manage_roles: bool,
}

impl MemberInfo {
    /// Whether the member currently holds `role_id`.
    pub fn has_role(&self, role_id: &str) -> bool {
        self.role_ids.contains(role_id)
    }
}

/// A guild role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleInfo {
    /// Role id.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// A guild channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    /// Channel id.
    pub id: String,
    /// Channel name as shown in the guild.
    pub name: String,
    /// Whether the channel accepts text messages.
    pub text_based: bool,
}

/// A custom guild emoji.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiInfo {
    /// Emoji id.
    pub id: String,
    /// Emoji name.
    pub name: String,
    /// Whether the emoji is animated.
    pub animated: bool,
}

impl EmojiInfo {
    /// Chat markup that renders the emoji inline.
    pub fn mention(&self) -> String {
        if self.animated {
            format!("<a:{}:{}>", self.name, self.id)
        } else {
            format!("<:{}:{}>", self.name, self.id)
        }
    }
}
