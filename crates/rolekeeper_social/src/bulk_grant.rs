//! Operator-initiated role grants to one member or a whole guild.

use crate::{CommandError, CommandErrorKind, CommandResult, Platform, PlatformResult};
use async_trait::async_trait;
use rolekeeper_core::{BulkGrantReport, GrantOutcome, MemberInfo};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Audit-log reason attached to operator grants.
const COMMAND_GRANT_REASON: &str = "Role given by command";

/// Receives progress of a bulk grant on behalf of the initiating actor.
#[async_trait]
pub trait GrantProgress: Send + Sync {
    /// The bulk grant has started.
    async fn acknowledged(&self);

    /// `successes` grants have succeeded so far.
    async fn progress(&self, successes: usize);
}

/// Result of a single-member grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberGrant {
    /// The role was added.
    Granted,
    /// The member already held the role; nothing was sent.
    AlreadyHeld,
}

/// Grants a role to one member or to every non-bot member of a guild.
///
/// Bulk runs are neither cancellable nor resumable. A re-run skips members
/// that already hold the role because each member is checked at grant time.
pub struct BulkGrantWorkflow<P> {
    platform: Arc<P>,
    progress_interval: usize,
}

impl<P> Clone for BulkGrantWorkflow<P> {
    fn clone(&self) -> Self {
        Self {
            platform: Arc::clone(&self.platform),
            progress_interval: self.progress_interval,
        }
    }
}

impl<P: Platform> BulkGrantWorkflow<P> {
    /// Create a workflow emitting progress every `progress_interval` successes.
    ///
    /// An interval of zero disables intermediate progress.
    pub fn new(platform: Arc<P>, progress_interval: usize) -> Self {
        Self {
            platform,
            progress_interval,
        }
    }

    /// Grant `role_id` to one member, returning the member as resolved.
    ///
    /// # Errors
    ///
    /// `MemberNotFound` if the member is not in the guild, `GrantFailed` if
    /// the platform refuses the grant.
    #[instrument(skip(self))]
    pub async fn grant_to_member(
        &self,
        guild_id: &str,
        role_id: &str,
        member_id: &str,
    ) -> CommandResult<(MemberGrant, MemberInfo)> {
        let member = self
            .platform
            .member(guild_id, member_id)
            .await?
            .ok_or_else(|| {
                CommandError::new(CommandErrorKind::MemberNotFound(member_id.to_string()))
            })?;

        if member.has_role(role_id) {
            debug!("Member already holds role");
            return Ok((MemberGrant::AlreadyHeld, member));
        }

        self.platform
            .grant_role(guild_id, member_id, role_id, COMMAND_GRANT_REASON)
            .await
            .map_err(|e| CommandError::new(CommandErrorKind::GrantFailed(e.kind().to_string())))?;

        info!("Granted role to member");
        Ok((MemberGrant::Granted, member))
    }

    /// Grant `role_id` to every non-bot member of the guild.
    ///
    /// Individual failures are recorded in the report and never stop the run.
    ///
    /// # Errors
    ///
    /// Fails only if the membership cannot be enumerated.
    #[instrument(skip(self, progress))]
    pub async fn grant_to_all(
        &self,
        guild_id: &str,
        role_id: &str,
        progress: &dyn GrantProgress,
    ) -> PlatformResult<BulkGrantReport> {
        progress.acknowledged().await;

        let members = self.platform.members(guild_id).await?;
        info!(members = members.len(), "Starting bulk grant");

        let mut report = BulkGrantReport::default();
        for member in members {
            if member.bot {
                report.skipped_bots += 1;
                continue;
            }
            if member.has_role(role_id) {
                report.already_held += 1;
                continue;
            }

            match self
                .platform
                .grant_role(guild_id, &member.id, role_id, COMMAND_GRANT_REASON)
                .await
            {
                Ok(()) => {
                    report.record(GrantOutcome::success(&member.id));
                    if self.progress_interval > 0
                        && report.success_count % self.progress_interval == 0
                    {
                        progress.progress(report.success_count).await;
                    }
                }
                Err(e) => {
                    warn!(member_id = %member.id, error = %e, "Bulk grant failed for member");
                    report.record(GrantOutcome::failure(&member.id, e.kind().to_string()));
                }
            }
        }

        info!(
            succeeded = report.success_count,
            failed = report.failure_count,
            already_held = report.already_held,
            skipped_bots = report.skipped_bots,
            "Bulk grant complete"
        );
        Ok(report)
    }
}
