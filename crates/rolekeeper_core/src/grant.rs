//! Role grant targets and results.

use serde::{Deserialize, Serialize};

/// Sentinel member value selecting every member of the guild.
pub const ALL_MEMBERS: &str = "all";

/// Who a grant command targets.
///
/// # Examples
///
/// ```
/// use rolekeeper_core::GrantTarget;
///
/// assert_eq!(GrantTarget::parse("all"), GrantTarget::AllMembers);
/// assert_eq!(GrantTarget::parse("42"), GrantTarget::Member("42".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrantTarget {
    /// A single member by id.
    Member(String),
    /// Every non-bot member of the guild.
    AllMembers,
}

impl GrantTarget {
    /// Parse the `member` command option.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed == ALL_MEMBERS {
            Self::AllMembers
        } else {
            Self::Member(trimmed.to_string())
        }
    }
}

/// Per-member result of a bulk grant attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantOutcome {
    /// Member the grant was attempted for.
    pub member_id: String,
    /// Whether the platform accepted the grant.
    pub succeeded: bool,
    /// Failure text when `succeeded` is false.
    pub error_detail: Option<String>,
}

impl GrantOutcome {
    /// A successful grant.
    pub fn success(member_id: impl Into<String>) -> Self {
        Self {
            member_id: member_id.into(),
            succeeded: true,
            error_detail: None,
        }
    }

    /// A failed grant with its error text.
    pub fn failure(member_id: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            member_id: member_id.into(),
            succeeded: false,
            error_detail: Some(detail.into()),
        }
    }
}

/// Aggregate result of a bulk grant.
///
/// # Examples
///
/// ```
/// use rolekeeper_core::{BulkGrantReport, GrantOutcome};
///
/// let mut report = BulkGrantReport::default();
/// report.record(GrantOutcome::success("u1"));
/// report.record(GrantOutcome::failure("u2", "missing permissions"));
/// assert_eq!(report.success_count, 1);
/// assert_eq!(report.failure_count, 1);
/// assert_eq!(report.failures().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkGrantReport {
    /// Members that received the role.
    pub success_count: usize,
    /// Members whose grant failed.
    pub failure_count: usize,
    /// Members that already held the role; no grant was attempted.
    pub already_held: usize,
    /// Automated accounts that were skipped.
    pub skipped_bots: usize,
    /// Every attempted grant, in processing order.
    pub outcomes: Vec<GrantOutcome>,
}

impl BulkGrantReport {
    /// Record one attempted grant.
    pub fn record(&mut self, outcome: GrantOutcome) {
        if outcome.succeeded {
            self.success_count += 1;
        } else {
            self.failure_count += 1;
        }
        self.outcomes.push(outcome);
    }

    /// Failed outcomes only.
    pub fn failures(&self) -> impl Iterator<Item = &GrantOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded)
    }
}
