//! Process-local key-value store with TTL expiry.
//!
//! Backs tests and single-process deployments. Entries hold their expiry
//! instant, computed once at insertion; reads past that instant report
//! absent and lazily drop the entry. An injected [`Clock`] decides what
//! "now" means, so TTL boundaries are testable without sleeping.

use std::collections::HashMap;
use std::sync::{Arc, RwLock as StdRwLock};

use agora_core::AgoraResult;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::clock::{Clock, SystemClock};
use crate::key::CacheKey;
use crate::traits::{CacheStats, KeyValueStore};

/// A stored value with its write time and fixed expiry instant.
#[derive(Debug, Clone)]
struct StoredEntry {
    bytes: Vec<u8>,
    written_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

/// In-memory `KeyValueStore` with per-entry TTL.
pub struct MemoryStore {
    entries: RwLock<HashMap<CacheKey, StoredEntry>>,
    stats: StdRwLock<CacheStats>,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    /// Create a store driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a store driven by the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            stats: StdRwLock::new(CacheStats::default()),
            clock,
        }
    }

    fn record_hit(&self) {
        if let Ok(mut stats) = self.stats.write() {
            stats.hits += 1;
        }
    }

    fn record_miss(&self) {
        if let Ok(mut stats) = self.stats.write() {
            stats.misses += 1;
        }
    }

    fn record_expiration(&self, freed_bytes: usize) {
        if let Ok(mut stats) = self.stats.write() {
            stats.expirations += 1;
            stats.entry_count = stats.entry_count.saturating_sub(1);
            stats.memory_bytes = stats.memory_bytes.saturating_sub(freed_bytes as u64);
        }
    }

    fn record_insert(&self, new_bytes: usize, replaced_bytes: Option<usize>) {
        if let Ok(mut stats) = self.stats.write() {
            match replaced_bytes {
                Some(old) => {
                    stats.memory_bytes = stats.memory_bytes.saturating_sub(old as u64);
                }
                None => stats.entry_count += 1,
            }
            stats.memory_bytes += new_bytes as u64;
        }
    }

    fn record_delete(&self, freed_bytes: usize) {
        if let Ok(mut stats) = self.stats.write() {
            stats.entry_count = stats.entry_count.saturating_sub(1);
            stats.memory_bytes = stats.memory_bytes.saturating_sub(freed_bytes as u64);
        }
    }

    /// Drop an entry we observed as expired, re-checking under the write
    /// lock since a concurrent `set` may have replaced it with a fresh one.
    async fn remove_if_expired(&self, key: &CacheKey, now: DateTime<Utc>) {
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key) {
            if now >= entry.expires_at {
                let freed = entry.bytes.len();
                entries.remove(key);
                self.record_expiration(freed);
            }
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &CacheKey) -> AgoraResult<Option<(Vec<u8>, DateTime<Utc>)>> {
        let now = self.clock.now();

        let expired = {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if now < entry.expires_at => {
                    self.record_hit();
                    return Ok(Some((entry.bytes.clone(), entry.written_at)));
                }
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            self.remove_if_expired(key, now).await;
        }
        self.record_miss();
        Ok(None)
    }

    async fn set(&self, key: &CacheKey, value: &[u8], ttl: Duration) -> AgoraResult<()> {
        let now = self.clock.now();
        let entry = StoredEntry {
            bytes: value.to_vec(),
            written_at: now,
            expires_at: now + ttl,
        };

        let mut entries = self.entries.write().await;
        let replaced = entries.insert(key.clone(), entry);
        self.record_insert(value.len(), replaced.map(|e| e.bytes.len()));
        Ok(())
    }

    async fn delete(&self, key: &CacheKey) -> AgoraResult<bool> {
        let mut entries = self.entries.write().await;
        match entries.remove(key) {
            Some(entry) => {
                self.record_delete(entry.bytes.len());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn stats(&self) -> AgoraResult<CacheStats> {
        match self.stats.read() {
            Ok(stats) => Ok(stats.clone()),
            Err(_) => Err(agora_core::StoreError::LockPoisoned.into()),
        }
    }
}
