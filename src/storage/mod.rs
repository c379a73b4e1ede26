//! Storage Module
//!
//! Narrow interfaces between the cache engine and its durable backend,
//! plus the bundled default implementations.

mod codec;
mod dir;

// Re-export public types
pub use codec::JsonCodec;
pub use dir::DirStore;

use crate::cache::CacheRecord;
use crate::error::Result;

// == Record Store ==
/// Durable storage for named cache records.
///
/// The store owns the mapping between logical keys and physical record
/// names; the engine never assumes anything about the naming scheme.
pub trait RecordStore {
    /// Physical record name for a logical key.
    fn record_name(&self, key: &str) -> String;

    /// Logical key for a physical record name, or None when the name does
    /// not belong to this store's naming scheme.
    fn record_key(&self, name: &str) -> Option<String>;

    /// Whether a record with this name currently exists.
    fn is_record(&self, name: &str) -> bool;

    /// Lists all record names under the storage root.
    fn list(&self) -> Result<Vec<String>>;

    /// Reads the raw contents of a named record.
    fn read(&self, name: &str) -> Result<Vec<u8>>;

    /// Writes the raw contents of a named record, replacing any previous
    /// contents.
    fn write(&self, name: &str, bytes: &[u8]) -> Result<()>;

    /// Deletes a named record. Callers check `is_record` first; deleting an
    /// absent record is a backend error.
    fn unlink(&self, name: &str) -> Result<()>;
}

// == Record Codec ==
/// Serialization scheme for cache records.
pub trait RecordCodec {
    /// Serializes a record and writes it under the given name.
    fn encode(&self, store: &dyn RecordStore, name: &str, record: &CacheRecord) -> Result<()>;

    /// Reads the named record and deserializes it.
    fn decode(&self, store: &dyn RecordStore, name: &str) -> Result<CacheRecord>;
}
