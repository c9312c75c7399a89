//! Clock abstraction for cache expiry.
//!
//! Expiry is fixed at insertion time and checked on every read, so the
//! store needs a time source it can be handed rather than reaching for
//! the system clock directly. Tests drive a `ManualClock` to cross TTL
//! boundaries deterministically.

use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Time source consulted for expiry decisions.
pub trait Clock: Send + Sync {
    /// Get the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock using system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock for deterministic tests.
///
/// Holds epoch milliseconds in an atomic so tests can advance time from
/// any thread without locking.
#[derive(Debug)]
pub struct ManualClock {
    epoch_millis: AtomicI64,
}

impl ManualClock {
    /// Start the clock at the given instant.
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            epoch_millis: AtomicI64::new(now.timestamp_millis()),
        }
    }

    /// Start the clock at the Unix epoch.
    pub fn at_epoch() -> Self {
        Self {
            epoch_millis: AtomicI64::new(0),
        }
    }

    /// Move the clock to the given instant.
    pub fn set(&self, to: DateTime<Utc>) {
        self.epoch_millis.store(to.timestamp_millis(), Ordering::SeqCst);
    }

    /// Advance the clock by a duration.
    pub fn advance(&self, by: Duration) {
        self.epoch_millis
            .fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.epoch_millis.load(Ordering::SeqCst);
        DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_starts_where_told() {
        let clock = ManualClock::at_epoch();
        assert_eq!(clock.now(), DateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::at_epoch();
        clock.advance(Duration::seconds(499));
        assert_eq!(clock.now().timestamp(), 499);
        clock.advance(Duration::seconds(2));
        assert_eq!(clock.now().timestamp(), 501);
    }

    #[test]
    fn test_manual_clock_set_overwrites() {
        let clock = ManualClock::at_epoch();
        let target = DateTime::from_timestamp(1_000_000, 0).expect("valid timestamp");
        clock.set(target);
        assert_eq!(clock.now(), target);
    }

    #[test]
    fn test_system_clock_is_roughly_now() {
        let clock = SystemClock;
        let delta = Utc::now().signed_duration_since(clock.now());
        assert!(delta.num_seconds().abs() < 5);
    }
}
