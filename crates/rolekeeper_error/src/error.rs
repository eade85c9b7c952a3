//! Top-level error wrapper types.

use crate::{ConfigError, DatabaseError};

/// Foundation error enum for the workspace.
///
/// # Examples
///
/// ```
/// use rolekeeper_error::{ConfigError, RolekeeperError};
///
/// let err: RolekeeperError = ConfigError::new("bad value").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum RolekeeperErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Database error
    #[from(DatabaseError)]
    Database(DatabaseError),
}

/// Rolekeeper error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Rolekeeper Error: {}", _0)]
pub struct RolekeeperError(Box<RolekeeperErrorKind>);

impl RolekeeperError {
    /// Create a new error from a kind.
    pub fn new(kind: RolekeeperErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RolekeeperErrorKind {
        &self.0
    }
}

impl<T> From<T> for RolekeeperError
where
    T: Into<RolekeeperErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Rolekeeper operations.
pub type RolekeeperResult<T> = std::result::Result<T, RolekeeperError>;
