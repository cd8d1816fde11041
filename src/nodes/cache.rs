//! Epoch-based memoization for pull evaluation
//!
//! Inputs cache the value they last read together with the epoch (`validId`)
//! it was read in. A cached value is trusted only while its stamp equals the
//! graph's current epoch, so advancing the epoch invalidates every cache in
//! O(1). Wrap-around is the one case that needs a full sweep: see
//! [`Epoch::advance`].

use crate::constants::epoch::{INITIAL_VALID_ID, INVALID_STAMP};
use serde::{Deserialize, Serialize};

/// Monotonic generation counter shared by every connector of one graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Epoch {
    valid_id: i64,
}

/// Outcome of [`Epoch::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The counter moved forward by one
    Stepped,
    /// The counter overflowed and restarted at zero; every stamp taken before
    /// must be discarded
    Wrapped,
}

impl Epoch {
    pub fn new() -> Self {
        Self::starting_at(INITIAL_VALID_ID)
    }

    /// Create an epoch counter at an arbitrary value
    pub fn starting_at(valid_id: i64) -> Self {
        Self { valid_id }
    }

    /// Current value of the counter
    pub fn valid_id(&self) -> i64 {
        self.valid_id
    }

    /// Open a new epoch.
    ///
    /// On overflow into negative territory the counter restarts at zero and
    /// [`Advance::Wrapped`] is returned; the caller must then reset every stamp
    /// to [`INVALID_STAMP`] or pre-overflow stamps would alias new ones.
    pub fn advance(&mut self) -> Advance {
        self.valid_id = self.valid_id.wrapping_add(1);
        if self.valid_id < 0 {
            self.valid_id = INITIAL_VALID_ID;
            Advance::Wrapped
        } else {
            Advance::Stepped
        }
    }

    /// Whether a stamp was taken in the current epoch
    pub fn is_current(&self, stamp: i64) -> bool {
        stamp != INVALID_STAMP && stamp == self.valid_id
    }
}

impl Default for Epoch {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about memoization behaviour
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoStatistics {
    /// Connected input reads answered from the input's cache
    pub hits: u64,
    /// Connected input reads that had to refresh from upstream
    pub misses: u64,
    /// Node bodies run (pull computations and control steps)
    pub evaluations: u64,
    /// Full invalidation sweeps
    pub invalidations: u64,
    /// Epoch counter wrap-arounds
    pub wraps: u64,
    /// Pull reads that re-entered a node still being computed
    pub cycles_flagged: u64,
}

impl MemoStatistics {
    /// Calculate cache hit ratio
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Reset every counter
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_steps() {
        let mut epoch = Epoch::new();
        assert_eq!(epoch.valid_id(), 0);
        assert_eq!(epoch.advance(), Advance::Stepped);
        assert_eq!(epoch.valid_id(), 1);
        assert!(epoch.is_current(1));
        assert!(!epoch.is_current(0));
    }

    #[test]
    fn test_advance_wraps_to_zero() {
        let mut epoch = Epoch::starting_at(i64::MAX);
        assert_eq!(epoch.advance(), Advance::Wrapped);
        assert_eq!(epoch.valid_id(), INITIAL_VALID_ID);
        assert_eq!(epoch.advance(), Advance::Stepped);
        assert_eq!(epoch.valid_id(), 1);
    }

    #[test]
    fn test_invalid_stamp_is_never_current() {
        let epoch = Epoch::starting_at(INVALID_STAMP);
        assert!(!epoch.is_current(INVALID_STAMP));
    }

    #[test]
    fn test_hit_ratio() {
        let mut stats = MemoStatistics::default();
        assert_eq!(stats.hit_ratio(), 0.0);
        stats.hits = 3;
        stats.misses = 1;
        assert!((stats.hit_ratio() - 0.75).abs() < f64::EPSILON);
        stats.reset();
        assert_eq!(stats, MemoStatistics::default());
    }
}
