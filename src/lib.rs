//! File Cache - a file-backed key/value cache
//!
//! Provides a cache engine with TTL expiry, compute-if-absent and buffered
//! writes over pluggable record storage, plus a registry for managing
//! multiple named caches.

pub mod cache;
pub mod config;
pub mod error;
pub mod registry;
pub mod storage;

pub use cache::{Cache, CacheRecord, CacheStats, CacheValue, FileCache, Generator, ValueMap};
pub use config::Config;
pub use error::{CacheError, Result};
pub use registry::CacheRegistry;
pub use storage::{DirStore, JsonCodec, RecordCodec, RecordStore};
