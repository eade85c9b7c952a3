//! Error types for the reaction-role engine.
//!
//! [`PlatformError`] covers failures of the chat platform collaborators.
//! [`CommandError`] is what an operator command can end in; every kind maps
//! to a fixed reply that never leaks internal detail.

use derive_getters::Getters;
use rolekeeper_error::DatabaseError;

/// Platform collaborator failures.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum PlatformErrorKind {
    /// The platform API rejected or failed a request.
    #[display("Platform API error: {_0}")]
    Api(String),

    /// The gateway connection could not be built or was lost.
    #[display("Connection failed: {_0}")]
    Connection(String),

    /// An identity string is not a valid platform id.
    #[display("Invalid ID: {_0}")]
    InvalidId(String),

    /// A partial payload could not be completed.
    #[display("Hydration failed: {_0}")]
    Hydration(String),
}

/// Platform error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Platform Error: {} at line {} in {}", kind, line, file)]
pub struct PlatformError {
    kind: PlatformErrorKind,
    line: u32,
    file: &'static str,
}

impl PlatformError {
    /// Create a new PlatformError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use rolekeeper_social::{PlatformError, PlatformErrorKind};
    ///
    /// let err = PlatformError::new(PlatformErrorKind::InvalidId("abc".to_string()));
    /// assert!(err.to_string().contains("Invalid ID"));
    /// ```
    #[track_caller]
    pub fn new(kind: PlatformErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for platform collaborator calls.
pub type PlatformResult<T> = Result<T, PlatformError>;

#[cfg(feature = "discord")]
impl From<serenity::Error> for PlatformError {
    #[track_caller]
    fn from(err: serenity::Error) -> Self {
        PlatformError::new(PlatformErrorKind::Api(err.to_string()))
    }
}

/// Ways an operator command can end without doing its job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CommandErrorKind {
    /// The actor lacks the role-management capability.
    #[display("Access denied")]
    AccessDenied,

    /// A required option was blank.
    #[display("Missing option: {_0}")]
    MissingOption(String),

    /// A removal was requested without any filter field.
    #[display("Empty filter")]
    EmptyFilter,

    /// The guild has no rules at all.
    #[display("No rules configured")]
    RuleNotFound,

    /// No rule matched the supplied filter.
    #[display("No rules matched")]
    NoRulesMatched,

    /// The referenced member does not exist in the guild.
    #[display("Member not found: {_0}")]
    MemberNotFound(String),

    /// The referenced role does not exist in the guild.
    #[display("Role not found: {_0}")]
    RoleNotFound(String),

    /// The platform refused a single-member grant.
    #[display("Grant failed: {_0}")]
    GrantFailed(String),

    /// Anything else; the detail is for logs only.
    #[display("Unexpected failure: {_0}")]
    Unexpected(String),
}

impl CommandErrorKind {
    /// Reply shown to the actor.
    pub fn user_message(&self) -> String {
        match self {
            Self::AccessDenied => "🚫 You do not have permission to use this command.".to_string(),
            Self::MissingOption(name) => format!("⚠️ Missing required option `{}`.", name),
            Self::EmptyFilter => {
                "⚠️ Provide at least one of `cargo`, `emoji` or `message-id`.".to_string()
            }
            Self::RuleNotFound => "🚫 No roles configured.".to_string(),
            Self::NoRulesMatched => "🚫 No matching configuration found.".to_string(),
            Self::MemberNotFound(_) => "🚫 Member not found.".to_string(),
            Self::RoleNotFound(_) => "🚫 Role not found.".to_string(),
            Self::GrantFailed(_) => "❌ Could not give the role.".to_string(),
            Self::Unexpected(_) => "❌ Something went wrong while running the command.".to_string(),
        }
    }

    /// Whether the failure should be logged at error level.
    pub fn is_unexpected(&self) -> bool {
        matches!(self, Self::Unexpected(_) | Self::GrantFailed(_))
    }
}

/// Command error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Command Error: {} at line {} in {}", kind, line, file)]
pub struct CommandError {
    kind: CommandErrorKind,
    line: u32,
    file: &'static str,
}

impl CommandError {
    /// Create a new CommandError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CommandErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for command bodies.
pub type CommandResult<T> = Result<T, CommandError>;

impl From<DatabaseError> for CommandError {
    #[track_caller]
    fn from(err: DatabaseError) -> Self {
        CommandError::new(CommandErrorKind::Unexpected(err.to_string()))
    }
}

impl From<PlatformError> for CommandError {
    #[track_caller]
    fn from(err: PlatformError) -> Self {
        CommandError::new(CommandErrorKind::Unexpected(err.to_string()))
    }
}
