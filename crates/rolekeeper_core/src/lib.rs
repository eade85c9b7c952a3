//! Core data types for Rolekeeper.
//!
//! This crate provides the domain values shared by the rule store, the
//! reaction reconciler and the bulk grant workflow. Everything here is held
//! by value; no type borrows from the persistence layer.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod emoji;
mod event;
mod grant;
mod platform;
mod rule;

pub use emoji::{EmojiMatch, WILDCARD_EMOJI};
pub use event::{ModerationEvent, ReactionActor, ReactionEvent};
pub use grant::{BulkGrantReport, GrantOutcome, GrantTarget, ALL_MEMBERS};
pub use platform::{
    ChannelInfo, EmojiInfo, MemberInfo, MemberInfoBuilder, MemberInfoBuilderError, RoleInfo,
};
pub use rule::{RoleRule, RuleFilter};
