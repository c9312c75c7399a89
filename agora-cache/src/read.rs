//! Miss contracts and read metadata.
//!
//! Callers state up front what a missing entity means to them, and every
//! read comes back wrapped with enough metadata to tell a served-from-cache
//! value from a freshly loaded one.

use chrono::{DateTime, Duration, Utc};

/// What a read-through miss against the authoritative source means.
///
/// Mirrors the two call styles the forum uses: pages that 404 when the
/// entity is gone, and optional lookups that shrug and move on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissPolicy {
    /// A missing entity is a `LoadError::NotFound`.
    #[default]
    NotFoundIsError,
    /// A missing entity is an empty result.
    AllowMissing,
}

impl MissPolicy {
    /// Returns true if a missing entity should surface as an error.
    pub fn is_error_on_missing(&self) -> bool {
        matches!(self, Self::NotFoundIsError)
    }
}

/// Result of a cache read, carrying provenance metadata.
///
/// Wraps the value with when it entered the cache and whether this read
/// was served from the store or from the authoritative source.
#[derive(Debug, Clone)]
pub struct CacheRead<T> {
    /// The value.
    value: T,
    /// When this value was written to the cache.
    cached_at: DateTime<Utc>,
    /// Whether this was a cache hit or miss.
    was_cache_hit: bool,
}

impl<T> CacheRead<T> {
    /// Create a read served from the cache.
    pub fn from_cache(value: T, cached_at: DateTime<Utc>) -> Self {
        Self {
            value,
            cached_at,
            was_cache_hit: true,
        }
    }

    /// Create a read served from the authoritative source (cache miss).
    pub fn from_source(value: T, loaded_at: DateTime<Utc>) -> Self {
        Self {
            value,
            cached_at: loaded_at,
            was_cache_hit: false,
        }
    }

    /// Consume the wrapper and return the underlying value.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Get a reference to the underlying value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Get a mutable reference to the underlying value.
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Get when this value entered the cache.
    pub fn cached_at(&self) -> DateTime<Utc> {
        self.cached_at
    }

    /// Age of the entry as of `now`. Never negative.
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        let age = now.signed_duration_since(self.cached_at);
        if age < Duration::zero() {
            Duration::zero()
        } else {
            age
        }
    }

    /// Check if this was a cache hit.
    pub fn was_cache_hit(&self) -> bool {
        self.was_cache_hit
    }

    /// Check if this was a cache miss (served from the source).
    pub fn was_cache_miss(&self) -> bool {
        !self.was_cache_hit
    }

    /// Map the inner value to a new type.
    pub fn map<U, F>(self, f: F) -> CacheRead<U>
    where
        F: FnOnce(T) -> U,
    {
        CacheRead {
            value: f(self.value),
            cached_at: self.cached_at,
            was_cache_hit: self.was_cache_hit,
        }
    }
}

impl<T> AsRef<T> for CacheRead<T> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_policy_default_is_error() {
        assert!(MissPolicy::default().is_error_on_missing());
        assert!(!MissPolicy::AllowMissing.is_error_on_missing());
    }

    #[test]
    fn test_cache_read_from_cache() {
        let cached_at = Utc::now();
        let read = CacheRead::from_cache("value".to_string(), cached_at);

        assert!(read.was_cache_hit());
        assert!(!read.was_cache_miss());
        assert_eq!(read.value(), "value");
        assert_eq!(read.cached_at(), cached_at);
    }

    #[test]
    fn test_cache_read_from_source() {
        let read = CacheRead::from_source(42i32, Utc::now());

        assert!(!read.was_cache_hit());
        assert!(read.was_cache_miss());
        assert_eq!(read.into_value(), 42);
    }

    #[test]
    fn test_age_at_never_negative() {
        let cached_at = Utc::now();
        let read = CacheRead::from_cache("x", cached_at);

        let later = cached_at + Duration::seconds(30);
        assert_eq!(read.age_at(later), Duration::seconds(30));

        let earlier = cached_at - Duration::seconds(30);
        assert_eq!(read.age_at(earlier), Duration::zero());
    }

    #[test]
    fn test_cache_read_map_keeps_metadata() {
        let cached_at = Utc::now();
        let read = CacheRead::from_cache(42i32, cached_at);
        let mapped = read.map(|v| v.to_string());

        assert!(mapped.was_cache_hit());
        assert_eq!(mapped.cached_at(), cached_at);
        assert_eq!(mapped.into_value(), "42");
    }
}
