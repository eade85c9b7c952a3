//! Logging initialisation.

use crate::LoggingConfig;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. With `verbose`, the fallback
/// level is `debug` regardless of configuration.
///
/// # Errors
///
/// Returns an error if the level is not a valid filter or a subscriber is
/// already installed.
pub fn init_logging(
    config: &LoggingConfig,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let level = if verbose { "debug" } else { config.level.as_str() };
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    let fmt_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_level(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
