//! Identity types for Agora entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Entity identifier. Forum data lives behind integer-keyed relational
/// storage, so ids are plain unsigned integers.
pub type EntityId = u64;

/// Entity kind discriminator for cache keys and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Forum,
    Topic,
    Post,
    User,
}

impl EntityKind {
    /// Stable lowercase name, used as the kind segment of cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Forum => "forum",
            EntityKind::Topic => "topic",
            EntityKind::Post => "post",
            EntityKind::User => "user",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forum" => Ok(EntityKind::Forum),
            "topic" => Ok(EntityKind::Topic),
            "post" => Ok(EntityKind::Post),
            "user" => Ok(EntityKind::User),
            other => Err(format!("unknown entity kind: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_display_is_lowercase() {
        assert_eq!(EntityKind::Forum.to_string(), "forum");
        assert_eq!(EntityKind::Topic.to_string(), "topic");
        assert_eq!(EntityKind::Post.to_string(), "post");
        assert_eq!(EntityKind::User.to_string(), "user");
    }

    #[test]
    fn test_entity_kind_from_str_roundtrip() {
        for kind in [
            EntityKind::Forum,
            EntityKind::Topic,
            EntityKind::Post,
            EntityKind::User,
        ] {
            let parsed: EntityKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_entity_kind_from_str_rejects_unknown() {
        assert!("thread".parse::<EntityKind>().is_err());
        assert!("".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_entity_kind_from_str_normalizes_case() {
        assert_eq!(" Forum ".parse::<EntityKind>().unwrap(), EntityKind::Forum);
        assert_eq!("USER".parse::<EntityKind>().unwrap(), EntityKind::User);
    }
}
