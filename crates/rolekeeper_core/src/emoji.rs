//! Emoji matching for role rules.

use serde::{Deserialize, Serialize};

/// Stored form of the wildcard emoji.
pub const WILDCARD_EMOJI: &str = "any";

/// Which reactions a rule responds to.
///
/// # Examples
///
/// ```
/// use rolekeeper_core::EmojiMatch;
///
/// let wildcard = EmojiMatch::parse("ANY").unwrap();
/// assert_eq!(wildcard, EmojiMatch::Any);
/// assert!(wildcard.matches("🎉"));
///
/// let party = EmojiMatch::parse("🎉").unwrap();
/// assert!(party.matches("🎉"));
/// assert!(!party.matches("👍"));
///
/// assert!(EmojiMatch::parse("  ").is_none());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(from = "String", into = "String")]
pub enum EmojiMatch {
    /// Any emoji on the target message.
    #[display("any")]
    Any,
    /// A concrete emoji identity (custom emoji id or unicode character).
    #[display("{}", _0)]
    Exact(String),
}

impl EmojiMatch {
    /// Parse an operator-supplied emoji value.
    ///
    /// Blank input yields `None`. The wildcard is recognised case-insensitively.
    /// Custom emoji mentions (`<:name:id>`, `<a:name:id>`) are reduced to their id.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let identity = custom_emoji_id(trimmed).unwrap_or(trimmed);
        Some(Self::from(identity.to_string()))
    }

    /// Whether a reaction with the given emoji identity satisfies this match.
    pub fn matches(&self, emoji_id: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(id) => id == emoji_id,
        }
    }

    /// True for the wildcard variant.
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Value written to the persistence layer.
    pub fn as_stored(&self) -> &str {
        match self {
            Self::Any => WILDCARD_EMOJI,
            Self::Exact(id) => id,
        }
    }
}

/// Id of a custom emoji mention, `None` for anything else.
fn custom_emoji_id(mention: &str) -> Option<&str> {
    let inner = mention.strip_prefix('<')?.strip_suffix('>')?;
    let mut parts = inner.split(':');
    let prefix = parts.next()?;
    let _name = parts.next()?;
    let id = parts.next()?;

    let well_formed = (prefix.is_empty() || prefix == "a")
        && parts.next().is_none()
        && !id.is_empty()
        && id.bytes().all(|b| b.is_ascii_digit());
    well_formed.then_some(id)
}

impl From<String> for EmojiMatch {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case(WILDCARD_EMOJI) {
            Self::Any
        } else {
            Self::Exact(value)
        }
    }
}

impl From<EmojiMatch> for String {
    fn from(value: EmojiMatch) -> Self {
        match value {
            EmojiMatch::Any => WILDCARD_EMOJI.to_string(),
            EmojiMatch::Exact(id) => id,
        }
    }
}
