//! Timestamp type used throughout the protocol.
//!
//! Timestamps are Unix epoch seconds (UTC). The engine never reads the system
//! clock on its own — every operation receives `now` from the caller, so all
//! deadline logic is deterministic and testable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch (time zero).
    pub const EPOCH: Self = Self(0);

    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Get the current system time as a `Timestamp`.
    ///
    /// Provided for callers at the service boundary; core operations take
    /// `now` as a parameter instead of calling this.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before Unix epoch")
            .as_secs();
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// This timestamp advanced by `secs`, saturating at the maximum.
    pub fn plus(&self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs))
    }

    /// Seconds elapsed since this timestamp (relative to `now`).
    pub fn elapsed_since(&self, now: Timestamp) -> u64 {
        now.0.saturating_sub(self.0)
    }

    /// Whether this timestamp + duration has passed relative to `now`.
    pub fn has_expired(&self, duration_secs: u64, now: Timestamp) -> bool {
        now.0 >= self.0.saturating_add(duration_secs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_is_inclusive_at_the_boundary() {
        let start = Timestamp::new(1000);
        assert!(!start.has_expired(100, Timestamp::new(1099)));
        assert!(start.has_expired(100, Timestamp::new(1100)));
    }

    #[test]
    fn elapsed_saturates_before_start() {
        let start = Timestamp::new(1000);
        assert_eq!(start.elapsed_since(Timestamp::new(900)), 0);
        assert_eq!(start.elapsed_since(Timestamp::new(1250)), 250);
    }

    #[test]
    fn plus_saturates_at_max() {
        let t = Timestamp::new(u64::MAX - 1);
        assert_eq!(t.plus(100).as_secs(), u64::MAX);
    }
}
