//! Read-through object cache gateway.
//!
//! The gateway sits between callers and the authoritative source of forum
//! entities. Reads flow:
//!
//! 1. No id at all: answer immediately with no value and no error. The
//!    store and the loader are never touched.
//! 2. Check the key-value store under the entity's object key.
//! 3. On a hit, decode and return the cached value.
//! 4. On a miss, call the loader exactly once.
//! 5. If the loader finds the entity, write it to the store with the
//!    caller's TTL and return it.
//! 6. If the loader comes up empty, the caller's [`MissPolicy`] decides
//!    between a `NotFound` error and an empty result. Nothing is cached
//!    for absent entities.
//!
//! Group memberships take the same path under a separate key facet, so an
//! entity's object and its group list never collide.
//!
//! Concurrent misses for the same key may each call the loader; last
//! write wins. Entity loads are cheap enough here that a stampede guard
//! is not worth the lock traffic.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use serde::de::DeserializeOwned;
use serde::Serialize;

use agora_core::{AgoraResult, CacheTuning, EntityId, EntityKind, GroupSet, LoadError, StoreError};

use crate::clock::{Clock, SystemClock};
use crate::key::CacheKey;
use crate::read::{CacheRead, MissPolicy};
use crate::traits::{Cacheable, KeyValueStore};

/// Authoritative source for a cacheable entity type.
///
/// Implementations wrap whatever actually owns the data, typically a
/// database table. The gateway calls `load_by_id` only on cache misses.
#[async_trait]
pub trait EntityLoader<T: Cacheable>: Send + Sync {
    /// Fetch an entity from the authoritative source.
    ///
    /// Returns `Ok(None)` when no entity has this id. Errors are reserved
    /// for source failures, not absence.
    async fn load_by_id(&self, id: EntityId) -> AgoraResult<Option<T>>;
}

/// Authoritative source for entity group memberships.
#[async_trait]
pub trait GroupSource: Send + Sync {
    /// Return the group names attached to an entity.
    ///
    /// An entity with no groups returns an empty set, not an error.
    async fn groups_of(&self, kind: EntityKind, id: EntityId) -> AgoraResult<GroupSet>;
}

/// Configuration for cache behavior.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL applied by [`ObjectCache::get_or_load_default`].
    pub default_ttl: Duration,
    /// TTL applied to cached group memberships.
    pub group_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: Duration::seconds(500),
            group_ttl: Duration::seconds(500),
        }
    }
}

impl CacheConfig {
    /// Create a new cache configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default object TTL.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Set the group membership TTL.
    pub fn with_group_ttl(mut self, ttl: Duration) -> Self {
        self.group_ttl = ttl;
        self
    }

    /// Build a configuration from validated tuning values.
    pub fn from_tuning(tuning: &CacheTuning) -> Self {
        Self {
            default_ttl: Duration::seconds(tuning.default_ttl_secs as i64),
            group_ttl: Duration::seconds(tuning.group_ttl_secs as i64),
        }
    }
}

/// Read-through cache over a key-value store.
///
/// Generic over the store so tests can swap in instrumented fakes while
/// production uses a real backend.
pub struct ObjectCache<S: KeyValueStore> {
    /// The underlying key-value store.
    store: Arc<S>,
    /// Cache configuration.
    config: CacheConfig,
    /// Clock used to timestamp values loaded from the source.
    clock: Arc<dyn Clock>,
}

impl<S: KeyValueStore> ObjectCache<S> {
    /// Create a new cache gateway over a store.
    pub fn new(store: Arc<S>, config: CacheConfig) -> Self {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    /// Create a cache gateway with default configuration.
    pub fn with_defaults(store: Arc<S>) -> Self {
        Self::new(store, CacheConfig::default())
    }

    /// Create a cache gateway with an explicit clock.
    pub fn with_clock(store: Arc<S>, config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            config,
            clock,
        }
    }

    /// Get the cache configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch an entity through the cache.
    ///
    /// `id` is optional so callers holding a nullable reference can pass
    /// it straight through: `None` yields `Ok(None)` without touching the
    /// store or the loader, and without consulting `on_missing`.
    pub async fn get_or_load<T, L>(
        &self,
        id: Option<EntityId>,
        loader: &L,
        ttl: Duration,
        on_missing: MissPolicy,
    ) -> AgoraResult<Option<CacheRead<T>>>
    where
        T: Cacheable,
        L: EntityLoader<T> + ?Sized,
    {
        let Some(id) = id else {
            return Ok(None);
        };

        let key = CacheKey::object(T::kind(), id);
        if let Some((bytes, cached_at)) = self.store.get(&key).await? {
            let value = decode_value(&key, &bytes)?;
            return Ok(Some(CacheRead::from_cache(value, cached_at)));
        }

        self.load_and_cache(&key, id, loader, ttl, on_missing).await
    }

    /// Fetch an entity with the configured default TTL, treating absence
    /// as an error.
    pub async fn get_or_load_default<T, L>(
        &self,
        id: Option<EntityId>,
        loader: &L,
    ) -> AgoraResult<Option<CacheRead<T>>>
    where
        T: Cacheable,
        L: EntityLoader<T> + ?Sized,
    {
        self.get_or_load(id, loader, self.config.default_ttl, MissPolicy::NotFoundIsError)
            .await
    }

    /// Fetch an entity's group memberships through the cache.
    ///
    /// Cached under the groups facet with the configured group TTL. Empty
    /// sets are cached like any other value, so a group-less entity does
    /// not hammer the source on every read.
    pub async fn groups_for<G>(
        &self,
        kind: EntityKind,
        id: EntityId,
        source: &G,
    ) -> AgoraResult<GroupSet>
    where
        G: GroupSource + ?Sized,
    {
        let key = CacheKey::groups(kind, id);
        if let Some((bytes, _)) = self.store.get(&key).await? {
            return decode_value(&key, &bytes);
        }

        let groups = source.groups_of(kind, id).await?;
        let bytes = encode_value(kind, id, &groups)?;
        self.store.set(&key, &bytes, self.config.group_ttl).await?;
        Ok(groups)
    }

    /// Write an entity into the cache, replacing any cached copy.
    ///
    /// Used after writes to keep readers from serving the stale copy for
    /// a full TTL.
    pub async fn put<T: Cacheable>(&self, entity: &T, ttl: Duration) -> AgoraResult<()> {
        let key = CacheKey::object(T::kind(), entity.id());
        let bytes = encode_value(T::kind(), entity.id(), entity)?;
        self.store.set(&key, &bytes, ttl).await
    }

    /// Drop an entity's cached object, if present.
    pub async fn invalidate<T: Cacheable>(&self, id: EntityId) -> AgoraResult<bool> {
        self.store.delete(&CacheKey::object(T::kind(), id)).await
    }

    /// Drop an entity's cached group memberships, if present.
    pub async fn invalidate_groups(&self, kind: EntityKind, id: EntityId) -> AgoraResult<bool> {
        self.store.delete(&CacheKey::groups(kind, id)).await
    }

    async fn load_and_cache<T, L>(
        &self,
        key: &CacheKey,
        id: EntityId,
        loader: &L,
        ttl: Duration,
        on_missing: MissPolicy,
    ) -> AgoraResult<Option<CacheRead<T>>>
    where
        T: Cacheable,
        L: EntityLoader<T> + ?Sized,
    {
        match loader.load_by_id(id).await? {
            Some(value) => {
                let bytes = encode_value(T::kind(), id, &value)?;
                self.store.set(key, &bytes, ttl).await?;
                Ok(Some(CacheRead::from_source(value, self.clock.now())))
            }
            None => match on_missing {
                MissPolicy::NotFoundIsError => Err(LoadError::NotFound {
                    kind: T::kind(),
                    id,
                }
                .into()),
                MissPolicy::AllowMissing => Ok(None),
            },
        }
    }
}

impl<S: KeyValueStore> Clone for ObjectCache<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

fn encode_value<T: Serialize>(kind: EntityKind, id: EntityId, value: &T) -> AgoraResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| {
        StoreError::Serialization {
            kind,
            id,
            reason: e.to_string(),
        }
        .into()
    })
}

fn decode_value<T: DeserializeOwned>(key: &CacheKey, bytes: &[u8]) -> AgoraResult<T> {
    serde_json::from_slice(bytes).map_err(|e| {
        StoreError::Deserialization {
            key: key.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}
