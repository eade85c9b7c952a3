//! Bot configuration.
//!
//! Sources in order of precedence (later sources override earlier):
//! 1. Bundled defaults (`rolekeeper.toml` shipped with the binary)
//! 2. `~/.config/rolekeeper/rolekeeper.toml`
//! 3. `./rolekeeper.toml`
//! 4. Environment variables prefixed `ROLEKEEPER__`, e.g.
//!    `ROLEKEEPER__BULK_GRANT__PROGRESS_INTERVAL=25`
//!
//! Secrets never live in these files. The token and database URL are read
//! from the environment variables the configuration names.

use config::{Config, Environment, File, FileFormat};
use rolekeeper_error::{ConfigError, RolekeeperResult};
use rolekeeper_social::EngineSettings;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../rolekeeper.toml");

/// Moderation channel settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuditConfig {
    /// Channel names that receive audit notifications.
    pub channel_aliases: Vec<String>,
}

/// Bulk grant settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BulkGrantConfig {
    /// Successful grants between two progress updates.
    pub progress_interval: u32,
}

/// Autocomplete settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AutocompleteConfig {
    /// Maximum number of suggestions returned.
    pub max_choices: usize,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

/// Top-level bot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BotConfig {
    /// Environment variable holding the bot token.
    pub discord_token_env: String,
    /// Environment variable holding the PostgreSQL URL.
    pub database_url_env: String,
    /// Register commands on this guild only instead of globally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub development_guild_id: Option<String>,
    /// Moderation channel settings.
    pub audit: AuditConfig,
    /// Bulk grant settings.
    pub bulk_grant: BulkGrantConfig,
    /// Autocomplete settings.
    pub autocomplete: AutocompleteConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

fn finish(builder: config::ConfigBuilder<config::builder::DefaultState>) -> RolekeeperResult<BotConfig> {
    let config = builder
        .build()
        .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
        .try_deserialize()
        .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
    Ok(config)
}

impl BotConfig {
    /// Load configuration from every source.
    ///
    /// Reads `.env` first so that environment overrides and secrets can
    /// live there during development.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be read or the merged
    /// configuration does not parse.
    #[instrument]
    pub fn load() -> RolekeeperResult<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env");
        }

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/rolekeeper/rolekeeper.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("rolekeeper").required(false))
            .add_source(
                Environment::with_prefix("ROLEKEEPER")
                    .prefix_separator("__")
                    .separator("__"),
            );

        finish(builder)
    }

    /// Load the bundled defaults overlaid with a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the document does not parse.
    pub fn from_toml(overrides: &str) -> RolekeeperResult<Self> {
        finish(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from_str(overrides, FileFormat::Toml)),
        )
    }

    fn secret(var: &str) -> RolekeeperResult<String> {
        match std::env::var(var) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(ConfigError::missing_secret(var).into()),
        }
    }

    /// The bot token.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the token variable is unset or blank.
    pub fn discord_token(&self) -> RolekeeperResult<String> {
        Self::secret(&self.discord_token_env)
    }

    /// The PostgreSQL URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL variable is unset or blank.
    pub fn database_url(&self) -> RolekeeperResult<String> {
        Self::secret(&self.database_url_env)
    }

    /// Engine tunables derived from this configuration.
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            audit_channel_aliases: self.audit.channel_aliases.clone(),
            progress_interval: self.bulk_grant.progress_interval as usize,
            max_choices: self.autocomplete.max_choices,
        }
    }
}
