//! Reaction-role engine for Rolekeeper.
//!
//! The engine turns reactions into role grants and gives operators slash
//! commands to manage the bindings. It only talks to the chat platform
//! through narrow collaborator traits such as [`MemberLookup`], so every
//! component runs unchanged against in-memory fakes.
//!
//! # Components
//!
//! - [`RuleResolver`] - rules triggered by a reaction
//! - [`AccessGuard`] - role-management authorization
//! - [`AuditSink`] - best-effort moderation channel notices
//! - [`ReactionReconciler`] - reaction events to role grants
//! - [`BulkGrantWorkflow`] - operator grants to one or all members
//! - [`RoleCommands`] - the operator command set
//! - [`Autocomplete`] - option suggestions
//!
//! # Features
//!
//! - `discord` - serenity adapter, gateway handler and bot client

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod access;
mod audit;
mod autocomplete;
mod bulk_grant;
mod commands;
mod error;
mod platform;
mod reconciler;
mod resolver;
mod settings;

#[cfg(feature = "discord")]
mod discord;

pub use access::AccessGuard;
pub use audit::{AuditDelivery, AuditSink};
pub use autocomplete::{Autocomplete, Choice, filter_choices};
pub use bulk_grant::{BulkGrantWorkflow, GrantProgress, MemberGrant};
pub use commands::{
    CONFIGURE_ROLES, CommandOutcome, CommandResponder, GIVE_ROLE, GrantOptions, Invocation,
    LIST_ROLES, REMOVE_ROLE, RoleCommands, RuleOptions,
};
pub use error::{
    CommandError, CommandErrorKind, CommandResult, PlatformError, PlatformErrorKind,
    PlatformResult,
};
pub use platform::{
    ChannelLookup, EmojiLookup, MemberLookup, Platform, ReactionHydrator, RoleGranter, RoleLookup,
};
pub use reconciler::{ReactionReconciler, Reconciliation};
pub use resolver::RuleResolver;
pub use settings::{
    DEFAULT_AUDIT_CHANNEL_ALIASES, DEFAULT_MAX_CHOICES, DEFAULT_PROGRESS_INTERVAL, EngineSettings,
};

#[cfg(feature = "discord")]
pub use discord::{
    InteractionResponder, RolekeeperBot, RolekeeperHandler, SerenityPlatform, ShutdownHandle,
    command_definitions,
};
