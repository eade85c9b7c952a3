//! Tunables shared by the engine components.

/// Moderation channel names recognised by default.
pub const DEFAULT_AUDIT_CHANNEL_ALIASES: &[&str] = &[
    "security",
    "segurança",
    "moderation",
    "moderação",
    "logs",
    "audit",
    "auditoria",
];

/// Successful grants between two progress updates of a bulk grant.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 10;

/// Platform cap on autocomplete choices.
pub const DEFAULT_MAX_CHOICES: usize = 25;

/// Engine settings, usually built from the bot configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Channel names that receive audit notifications, matched case-insensitively.
    pub audit_channel_aliases: Vec<String>,
    /// Successful grants between two bulk progress updates.
    pub progress_interval: usize,
    /// Maximum number of autocomplete choices returned.
    pub max_choices: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            audit_channel_aliases: DEFAULT_AUDIT_CHANNEL_ALIASES
                .iter()
                .map(|alias| alias.to_string())
                .collect(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            max_choices: DEFAULT_MAX_CHOICES,
        }
    }
}
