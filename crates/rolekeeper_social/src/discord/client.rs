//! Bot client lifecycle.

use super::RolekeeperHandler;
use crate::{PlatformError, PlatformErrorKind, PlatformResult};
use serenity::Client;
use serenity::all::ShardManager;
use std::sync::Arc;
use tracing::{info, instrument};

/// The single long-lived gateway connection.
///
/// Created explicitly, started explicitly, and stopped through a
/// [`ShutdownHandle`].
pub struct RolekeeperBot {
    client: Client,
}

impl RolekeeperBot {
    /// Build a client for `token` driving `handler`.
    ///
    /// # Errors
    ///
    /// Returns a `Connection` error if the client cannot be built.
    #[instrument(skip(token, handler), fields(token_len = token.len()))]
    pub async fn new(token: &str, handler: RolekeeperHandler) -> PlatformResult<Self> {
        let intents = RolekeeperHandler::intents();
        info!(?intents, "Building Serenity client");

        let client = Client::builder(token, intents)
            .event_handler(handler)
            .await
            .map_err(|e| {
                PlatformError::new(PlatformErrorKind::Connection(format!(
                    "Failed to build client: {}",
                    e
                )))
            })?;

        Ok(Self { client })
    }

    /// A handle that stops the gateway connection from another task.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle(Arc::clone(&self.client.shard_manager))
    }

    /// Connect and process events until shut down.
    ///
    /// # Errors
    ///
    /// Returns a `Connection` error if the gateway fails fatally.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> PlatformResult<()> {
        info!("Starting Discord bot");
        self.client.start().await.map_err(|e| {
            PlatformError::new(PlatformErrorKind::Connection(format!(
                "Client error: {}",
                e
            )))
        })?;
        info!("Discord bot stopped");
        Ok(())
    }
}

/// Stops a running [`RolekeeperBot`].
#[derive(Clone)]
pub struct ShutdownHandle(Arc<ShardManager>);

impl ShutdownHandle {
    /// Close every shard; `start` returns afterwards.
    pub async fn shutdown(&self) {
        info!("Shutting down gateway connection");
        self.0.shutdown_all().await;
    }
}
