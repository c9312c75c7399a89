//! Core entity structures.
//!
//! Lean row images of the forum domain. These carry only the fields the
//! cache and access layers act on; rendering-oriented columns (counters,
//! timestamps, signatures) stay in the owning application.

use crate::EntityId;
use serde::{Deserialize, Serialize};

/// A forum: the unit of access control. Required group names are not
/// stored inline; they are fetched lazily through a group source and
/// cached, matching how membership is attached to forums upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forum {
    pub id: EntityId,
    pub slug: String,
    pub name: String,
    pub description: String,
}

impl Forum {
    pub fn new(id: EntityId, slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            slug: slug.into(),
            name: name.into(),
            description: String::new(),
        }
    }
}

/// A topic within a forum. Access control is inherited from the owning
/// forum via `forum_id`; topics carry no group set of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: EntityId,
    pub forum_id: EntityId,
    pub subject: String,
    pub closed: bool,
}

impl Topic {
    pub fn new(id: EntityId, forum_id: EntityId, subject: impl Into<String>) -> Self {
        Self {
            id,
            forum_id,
            subject: subject.into(),
            closed: false,
        }
    }
}

/// A post within a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: EntityId,
    pub topic_id: EntityId,
    pub author_id: EntityId,
    pub message: String,
}

impl Post {
    pub fn new(
        id: EntityId,
        topic_id: EntityId,
        author_id: EntityId,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id,
            topic_id,
            author_id,
            message: message.into(),
        }
    }
}

/// A user account. Group membership lives in the group source, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub username: String,
}

impl User {
    pub fn new(id: EntityId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_links_to_forum() {
        let topic = Topic::new(10, 3, "Welcome");
        assert_eq!(topic.forum_id, 3);
        assert!(!topic.closed);
    }

    #[test]
    fn test_entity_serde_roundtrip() {
        let forum = Forum::new(7, "general", "General");
        let json = serde_json::to_string(&forum).unwrap();
        let back: Forum = serde_json::from_str(&json).unwrap();
        assert_eq!(back, forum);

        let post = Post::new(42, 10, 5, "hello");
        let json = serde_json::to_string(&post).unwrap();
        let back: Post = serde_json::from_str(&json).unwrap();
        assert_eq!(back, post);
    }
}
