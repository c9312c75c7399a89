//! Agora Cache - Read-Through Object Cache
//!
//! A TTL key-value store abstraction plus the read-through gateway the
//! forum services use to avoid refetching hot entities. The in-memory
//! backend is suitable for single-process deployments and tests; other
//! backends implement [`KeyValueStore`].

pub mod clock;
pub mod key;
pub mod memory;
pub mod read;
pub mod read_through;
pub mod traits;

pub use clock::{Clock, ManualClock, SystemClock};
pub use key::{CacheKey, Facet};
pub use memory::MemoryStore;
pub use read::{CacheRead, MissPolicy};
pub use traits::{CacheStats, Cacheable, KeyValueStore};

// Re-export the gateway types most callers need
pub use read_through::{CacheConfig, EntityLoader, GroupSource, ObjectCache};
