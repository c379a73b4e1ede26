//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses and durable writes.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Number of records written to the durable store
    pub writes: u64,
    /// Current number of entries in the hot layer
    pub hot_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no retrievals have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Write ==
    /// Increments the durable-write counter.
    pub fn record_write(&mut self) {
        self.writes += 1;
    }

    // == Update Hot Entry Count ==
    /// Updates the hot-layer entry count.
    pub fn set_hot_entries(&mut self, count: usize) {
        self.hot_entries = count;
    }
}
