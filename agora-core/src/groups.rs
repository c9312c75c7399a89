//! Group-name sets for resources and requesters.
//!
//! A forum's group set is its access requirement: empty means public,
//! non-empty means a requester needs at least one of the named groups
//! (or superuser status). A user's group set is their membership list.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// An unordered set of group names. Uniqueness is enforced; iteration
/// order is deterministic (sorted) so assertions and logs are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupSet(BTreeSet<String>);

impl GroupSet {
    /// Create an empty group set.
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Add a group name. Returns false if it was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    /// Remove a group name. Returns true if it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the two sets share at least one group name.
    pub fn intersects(&self, other: &GroupSet) -> bool {
        // Walk the smaller set, probe the larger.
        let (probe, walk) = if self.0.len() <= other.0.len() {
            (other, self)
        } else {
            (self, other)
        };
        walk.0.iter().any(|name| probe.0.contains(name.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FromIterator<String> for GroupSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for GroupSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_owned).collect())
    }
}

impl fmt::Display for GroupSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", name)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_is_empty() {
        let set = GroupSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_insert_deduplicates() {
        let mut set = GroupSet::new();
        assert!(set.insert("staff"));
        assert!(!set.insert("staff"));
        assert_eq!(set.len(), 1);
        assert!(set.contains("staff"));
    }

    #[test]
    fn test_intersects_on_shared_member() {
        let a: GroupSet = ["staff", "moderators"].into_iter().collect();
        let b: GroupSet = ["moderators"].into_iter().collect();
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_disjoint_sets_do_not_intersect() {
        let a: GroupSet = ["staff"].into_iter().collect();
        let b: GroupSet = ["students"].into_iter().collect();
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_empty_set_intersects_nothing() {
        let empty = GroupSet::new();
        let a: GroupSet = ["staff"].into_iter().collect();
        assert!(!empty.intersects(&a));
        assert!(!a.intersects(&empty));
        assert!(!empty.intersects(&empty));
    }

    #[test]
    fn test_display_is_sorted() {
        let set: GroupSet = ["zeta", "alpha"].into_iter().collect();
        assert_eq!(set.to_string(), "{alpha, zeta}");
    }

    #[test]
    fn test_serde_roundtrip_is_transparent_list() {
        let set: GroupSet = ["staff", "alumni"].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["alumni","staff"]"#);
        let back: GroupSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
