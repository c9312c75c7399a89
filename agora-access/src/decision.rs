//! Group authorization decisions.
//!
//! The decision core is a standalone pure function of four inputs, so it
//! can be unit-tested exhaustively and reused outside the guards. Denial
//! is a normal outcome, never an error.

use agora_core::{EntityId, GroupSet};

use crate::requester::Requester;

/// Why access was denied.
///
/// Callers route `Unauthenticated` to a sign-in redirect and
/// `NotInGroup` to a permission-denied response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The resource is restricted and the requester is not signed in.
    Unauthenticated,
    /// The requester is signed in but shares no group with the resource.
    NotInGroup,
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Access is allowed.
    Granted,
    /// Access is refused, with the reason callers branch on.
    Denied(DenyReason),
}

impl AccessDecision {
    /// Check if access was granted.
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Check if access was denied.
    pub fn is_denied(&self) -> bool {
        !self.is_granted()
    }

    /// The denial reason, if access was denied.
    pub fn deny_reason(&self) -> Option<DenyReason> {
        match self {
            Self::Granted => None,
            Self::Denied(reason) => Some(*reason),
        }
    }
}

/// Decide whether a requester may access a group-restricted resource.
///
/// Checks run in order:
/// 1. A resource with no required groups is public: anyone may access it.
/// 2. A restricted resource refuses requesters who are not signed in.
/// 3. Superusers pass every group check.
/// 4. Otherwise membership in any one required group suffices.
pub fn decide(
    resource_groups: &GroupSet,
    requester_groups: &GroupSet,
    authenticated: bool,
    superuser: bool,
) -> AccessDecision {
    if resource_groups.is_empty() {
        return AccessDecision::Granted;
    }
    if !authenticated {
        return AccessDecision::Denied(DenyReason::Unauthenticated);
    }
    if superuser {
        return AccessDecision::Granted;
    }
    if resource_groups.intersects(requester_groups) {
        AccessDecision::Granted
    } else {
        AccessDecision::Denied(DenyReason::NotInGroup)
    }
}

/// Boolean form of [`decide`].
pub fn is_authorized(
    resource_groups: &GroupSet,
    requester_groups: &GroupSet,
    authenticated: bool,
    superuser: bool,
) -> bool {
    decide(resource_groups, requester_groups, authenticated, superuser).is_granted()
}

/// Whether a requester may edit a post.
///
/// Staff may edit any post; everyone else only their own. Anonymous
/// requesters may edit nothing.
pub fn may_edit_post(author_id: EntityId, requester: &Requester) -> bool {
    if !requester.authenticated {
        return false;
    }
    requester.staff || requester.id == Some(author_id)
}
