//! Store traits and the cacheable entity marker.
//!
//! The key-value seam deals in opaque serialized bytes so a backend can
//! be swapped (process-local map, memcached, redis) without knowing the
//! entity types flowing through it. TTL enforcement is the store's duty;
//! expiry is fixed when an entry is written and never renewed on read.

use crate::key::CacheKey;
use agora_core::{AgoraResult, EntityId, EntityKind};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Serialize};

/// Marker trait for types that can be cached.
///
/// # Implementation Requirements
///
/// - `kind()` must return a consistent value for all instances
/// - `id()` must return the unique identifier for this instance
/// - Implementations must be `Clone`, `Serialize`, and `DeserializeOwned`
///   for cache storage
/// - Implementations must be `Send + Sync + 'static` for async compatibility
pub trait Cacheable: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Get the entity kind for this cacheable.
    fn kind() -> EntityKind;

    /// Get the unique identifier for this entity.
    fn id(&self) -> EntityId;
}

/// Key-value store trait for pluggable cache backends.
///
/// Implementations must be thread-safe. Values are opaque bytes; the
/// read-through layer owns serialization. A `get` must report an entry
/// whose TTL has elapsed as absent.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get a value from the store.
    ///
    /// Returns the stored bytes and when they were written, or None if
    /// the key is absent or its entry has expired.
    async fn get(&self, key: &CacheKey) -> AgoraResult<Option<(Vec<u8>, DateTime<Utc>)>>;

    /// Write a value with a time-to-live.
    ///
    /// The expiry instant is computed once, here, from the write time
    /// plus `ttl`. Reads never extend it.
    async fn set(&self, key: &CacheKey, value: &[u8], ttl: Duration) -> AgoraResult<()>;

    /// Remove a key. Returns true if an entry was present.
    async fn delete(&self, key: &CacheKey) -> AgoraResult<bool>;

    /// Get store statistics.
    async fn stats(&self) -> AgoraResult<CacheStats>;
}

/// Statistics about store usage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses (absent or expired).
    pub misses: u64,
    /// Number of live entries currently stored.
    pub entry_count: u64,
    /// Approximate memory usage in bytes.
    pub memory_bytes: u64,
    /// Number of entries dropped because their TTL elapsed.
    pub expirations: u64,
}

impl CacheStats {
    /// Calculate the hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// ============================================================================
// IMPLEMENTATIONS FOR FORUM ENTITIES
// ============================================================================

use agora_core::{Forum, Post, Topic, User};

impl Cacheable for Forum {
    fn kind() -> EntityKind {
        EntityKind::Forum
    }

    fn id(&self) -> EntityId {
        self.id
    }
}

impl Cacheable for Topic {
    fn kind() -> EntityKind {
        EntityKind::Topic
    }

    fn id(&self) -> EntityId {
        self.id
    }
}

impl Cacheable for Post {
    fn kind() -> EntityKind {
        EntityKind::Post
    }

    fn id(&self) -> EntityId {
        self.id
    }
}

impl Cacheable for User {
    fn kind() -> EntityKind {
        EntityKind::User
    }

    fn id(&self) -> EntityId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_stats_hit_rate() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            ..Default::default()
        };
        assert!((stats.hit_rate() - 0.8).abs() < 0.001);

        let empty_stats = CacheStats::default();
        assert!((empty_stats.hit_rate() - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_cacheable_entity_kinds() {
        assert_eq!(Forum::kind(), EntityKind::Forum);
        assert_eq!(Topic::kind(), EntityKind::Topic);
        assert_eq!(Post::kind(), EntityKind::Post);
        assert_eq!(User::kind(), EntityKind::User);
    }

    #[test]
    fn test_cacheable_id_reads_struct_field() {
        let topic = Topic::new(31, 4, "Rules");
        assert_eq!(Cacheable::id(&topic), 31);
    }
}
