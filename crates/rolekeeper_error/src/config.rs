//! Configuration error types.

/// A configuration source was unreadable, malformed or incomplete.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// What is wrong with the configuration
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a ConfigError at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// A secret expected in the environment variable `var` is unset or blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use rolekeeper_error::ConfigError;
    ///
    /// let err = ConfigError::missing_secret("DISCORD_TOKEN");
    /// assert_eq!(err.message, "DISCORD_TOKEN environment variable not set");
    /// assert!(err.to_string().starts_with("Configuration Error: DISCORD_TOKEN"));
    /// ```
    #[track_caller]
    pub fn missing_secret(var: &str) -> Self {
        Self::new(format!("{} environment variable not set", var))
    }
}
