//! Requester identity for authorization checks.

use agora_core::EntityId;

/// Identity facts about the party making a request.
///
/// Carries only what the gate decides on. Group memberships are not
/// stored inline; the guards resolve them lazily through the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    /// User id, absent for anonymous visitors.
    pub id: Option<EntityId>,

    /// Whether the requester is signed in.
    pub authenticated: bool,

    /// Superusers pass every group check.
    pub superuser: bool,

    /// Staff may edit any post but hold no blanket view rights.
    pub staff: bool,
}

impl Requester {
    /// An anonymous visitor: no id, not signed in.
    pub fn anonymous() -> Self {
        Self {
            id: None,
            authenticated: false,
            superuser: false,
            staff: false,
        }
    }

    /// A signed-in user.
    pub fn user(id: EntityId) -> Self {
        Self {
            id: Some(id),
            authenticated: true,
            superuser: false,
            staff: false,
        }
    }

    /// Grant superuser rights.
    pub fn as_superuser(mut self) -> Self {
        self.superuser = true;
        self
    }

    /// Grant staff rights.
    pub fn as_staff(mut self) -> Self {
        self.staff = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_has_no_id_or_rights() {
        let visitor = Requester::anonymous();
        assert_eq!(visitor.id, None);
        assert!(!visitor.authenticated);
        assert!(!visitor.superuser);
        assert!(!visitor.staff);
    }

    #[test]
    fn test_user_is_authenticated() {
        let user = Requester::user(42);
        assert_eq!(user.id, Some(42));
        assert!(user.authenticated);
        assert!(!user.superuser);
    }

    #[test]
    fn test_builder_flags() {
        let admin = Requester::user(1).as_superuser();
        assert!(admin.superuser);
        assert!(!admin.staff);

        let moderator = Requester::user(2).as_staff();
        assert!(moderator.staff);
        assert!(!moderator.superuser);
    }
}
