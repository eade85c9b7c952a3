//! Authorization for operator commands.

use rolekeeper_core::MemberInfo;
use tracing::debug;

/// Decides whether an actor may manage reaction roles.
///
/// Fails closed: a missing guild or a missing member is never authorized.
///
/// # Examples
///
/// ```
/// use rolekeeper_core::MemberInfoBuilder;
/// use rolekeeper_social::AccessGuard;
///
/// let admin = MemberInfoBuilder::default()
///     .id("u1")
///     .username("admin")
///     .manage_roles(true)
///     .build()
///     .unwrap();
///
/// let guard = AccessGuard;
/// assert!(guard.can_manage_roles(Some("g1"), Some(&admin)));
/// assert!(!guard.can_manage_roles(None, Some(&admin)));
/// assert!(!guard.can_manage_roles(Some("g1"), None));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGuard;

impl AccessGuard {
    /// True when `actor` holds the role-management capability in `guild_id`.
    pub fn can_manage_roles(&self, guild_id: Option<&str>, actor: Option<&MemberInfo>) -> bool {
        let allowed = match (guild_id, actor) {
            (Some(_), Some(member)) => member.manage_roles,
            _ => false,
        };
        debug!(
            guild_id = guild_id.unwrap_or("-"),
            actor_id = actor.map(|m| m.id.as_str()).unwrap_or("-"),
            allowed,
            "Checked role management capability"
        );
        allowed
    }
}
