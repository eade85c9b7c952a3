//! Reaction-to-role bindings.

use crate::EmojiMatch;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A binding from a reaction signature to a grantable role.
///
/// Rules are never mutated in place; they are created and deleted.
///
/// # Examples
///
/// ```
/// use rolekeeper_core::{EmojiMatch, RoleRule};
///
/// let rule = RoleRule::new("g1", "roleA", EmojiMatch::Any, "m1");
/// assert_eq!(rule.guild_id(), "g1");
/// assert!(rule.emoji().is_any());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct RoleRule {
    /// Guild the rule belongs to.
    guild_id: String,
    /// Role granted when the rule matches.
    role_id: String,
    /// Emoji the rule responds to.
    emoji: EmojiMatch,
    /// Message the reaction must be attached to.
    message_id: String,
}

impl RoleRule {
    /// Create a new rule.
    pub fn new(
        guild_id: impl Into<String>,
        role_id: impl Into<String>,
        emoji: EmojiMatch,
        message_id: impl Into<String>,
    ) -> Self {
        Self {
            guild_id: guild_id.into(),
            role_id: role_id.into(),
            emoji,
            message_id: message_id.into(),
        }
    }

    /// Whether this rule fires for a reaction with `emoji_id` on `message_id`.
    pub fn applies_to(&self, message_id: &str, emoji_id: &str) -> bool {
        self.message_id == message_id && self.emoji.matches(emoji_id)
    }
}

/// Optional-field filter over rules within one guild.
///
/// An absent field matches every value of that field. The guild is never
/// part of the filter; callers always pass it separately.
///
/// # Examples
///
/// ```
/// use rolekeeper_core::{EmojiMatch, RoleRule, RuleFilter};
///
/// let rule = RoleRule::new("g1", "roleA", EmojiMatch::Any, "m1");
/// assert!(RuleFilter::default().matches(&rule));
/// assert!(RuleFilter::default().with_role_id("roleA").matches(&rule));
/// assert!(!RuleFilter::default().with_message_id("m2").matches(&rule));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct RuleFilter {
    role_id: Option<String>,
    emoji: Option<EmojiMatch>,
    message_id: Option<String>,
}

impl RuleFilter {
    /// Build a filter from raw operator input, treating blank values as absent.
    pub fn from_options(
        role_id: Option<&str>,
        emoji: Option<&str>,
        message_id: Option<&str>,
    ) -> Self {
        let non_blank = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        Self {
            role_id: non_blank(role_id),
            emoji: emoji.and_then(EmojiMatch::parse),
            message_id: non_blank(message_id),
        }
    }

    /// Restrict to one role.
    pub fn with_role_id(mut self, role_id: impl Into<String>) -> Self {
        self.role_id = Some(role_id.into());
        self
    }

    /// Restrict to one emoji match (exact or wildcard rules).
    pub fn with_emoji(mut self, emoji: EmojiMatch) -> Self {
        self.emoji = Some(emoji);
        self
    }

    /// Restrict to one message.
    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.role_id.is_none() && self.emoji.is_none() && self.message_id.is_none()
    }

    /// Whether `rule` satisfies every set field.
    ///
    /// The emoji field compares stored values, so an `Any` filter selects
    /// wildcard rules only.
    pub fn matches(&self, rule: &RoleRule) -> bool {
        self.role_id.as_ref().is_none_or(|r| r == rule.role_id())
            && self.emoji.as_ref().is_none_or(|e| e == rule.emoji())
            && self
                .message_id
                .as_ref()
                .is_none_or(|m| m == rule.message_id())
    }
}
