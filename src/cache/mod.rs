//! Cache Module
//!
//! The cache engine, its value and record types, and the public cache
//! contract shared with the registry.

mod record;
mod stats;
mod store;
mod value;


// Re-export public types
pub use record::{current_timestamp, CacheRecord};
pub use stats::CacheStats;
pub use store::FileCache;
pub use value::{CacheValue, ValueMap};

use crate::error::Result;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 255;

// == Generator ==
/// Value producer invoked by [`Cache::entry`] on a miss.
///
/// Boxed so the contract stays object-safe; runs at most once per `entry`
/// call and only when no unexpired value exists for the key.
pub type Generator<'a> = Box<dyn FnOnce() -> ValueMap + 'a>;

// == Cache Contract ==
/// The public contract of a cache engine.
///
/// Object-safe so heterogeneous cache implementations can sit behind one
/// registry.
pub trait Cache {
    /// Returns the cached value for `key` if it exists and is unexpired;
    /// otherwise invokes `generator`, stores its result under `ttl` and
    /// returns it.
    fn entry(
        &mut self,
        key: &str,
        generator: Generator<'_>,
        ttl: Option<i64>,
    ) -> Result<CacheValue>;

    /// Associates `value` with `key` in the hot layer and persists it
    /// immediately unless write buffering is enabled.
    fn store(&mut self, key: &str, value: CacheValue, ttl: Option<i64>) -> Result<()>;

    /// Retrieves the value for `key`, failing with a miss when no unexpired
    /// value is available.
    fn fetch(&mut self, key: &str) -> Result<CacheValue>;

    /// Whether `fetch(key)` would succeed. Miss errors are absorbed into
    /// `false`; backend errors still propagate.
    fn exists(&mut self, key: &str) -> Result<bool>;

    /// Removes `key` from the hot layer and the backing store. Idempotent.
    fn delete(&mut self, key: &str) -> Result<()>;

    /// Enumerates all currently valid keys known to the backing store.
    fn keys(&mut self) -> Result<Vec<String>>;

    /// Deletes every currently valid key.
    fn clear(&mut self) -> Result<()>;

    /// Discards any pending writes and defers persistence until `commit`.
    fn enable_buffer(&mut self);

    /// Leaves buffered mode and replays the pending writes.
    fn commit(&mut self) -> Result<()>;
}
