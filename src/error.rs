//! Error types for the cache crate
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache operations.
#[derive(Error, Debug)]
pub enum CacheError {
    /// No record exists for the key
    #[error("Key not found: {0}")]
    NotFound(String),

    /// A record existed but its TTL has elapsed
    #[error("Key expired: {0}")]
    Expired(String),

    /// Key rejected before reaching the backing store
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// I/O failure in the backing store
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed or unserializable record
    #[error("Codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// Lookup of a cache name that was never registered
    #[error("No cache registered under name: {0}")]
    NotRegistered(String),
}

impl CacheError {
    // == Is Miss ==
    /// True for the miss-shaped variants (`NotFound`, `Expired`).
    ///
    /// Misses are locally recoverable; `exists`, `keys` and `clear` absorb
    /// them while backend errors keep propagating.
    pub fn is_miss(&self) -> bool {
        matches!(self, CacheError::NotFound(_) | CacheError::Expired(_))
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
