//! Cache Record Module
//!
//! Defines the durable {ttl, value} pair and its expiry rule.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::cache::CacheValue;

// == Cache Record ==
/// Durable representation of one cache entry.
///
/// This is exactly what the codec writes to the backing store: an absolute
/// expiry instant and the payload, nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheRecord {
    /// Absolute expiry instant (Unix seconds), None = never expires
    pub ttl: Option<i64>,
    /// The cached payload
    pub value: CacheValue,
}

impl CacheRecord {
    // == Constructor ==
    /// Creates a record for a value with an optional expiry instant.
    pub fn new(value: CacheValue, ttl: Option<i64>) -> Self {
        Self { ttl, value }
    }

    // == Is Expired ==
    /// Checks if the record has expired.
    ///
    /// Boundary condition: a record is expired only once the current time
    /// has moved past its expiry instant. A record whose ttl equals the
    /// current second is still served.
    ///
    /// # Returns
    /// - `true` if the record has a ttl that lies in the past
    /// - `false` if the record has no ttl (never expires) or the ttl has
    ///   not elapsed yet
    pub fn is_expired(&self) -> bool {
        match self.ttl {
            Some(ttl) => ttl < current_timestamp(),
            None => false,
        }
    }
}

// == Utility Functions ==
/// Returns the current Unix timestamp in seconds.
pub fn current_timestamp() -> i64 {
    Utc::now().timestamp()
}
