//! Cache Engine Module
//!
//! File-backed cache engine combining an in-memory hot layer with durable
//! record storage, compute-if-absent and buffered writes.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::cache::{Cache, CacheRecord, CacheStats, CacheValue, Generator, MAX_KEY_LENGTH};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::storage::{DirStore, JsonCodec, RecordCodec, RecordStore};

// == Pending Write ==
/// A write deferred while buffering is enabled, replayed by `commit`.
#[derive(Debug, Clone)]
struct PendingWrite {
    key: String,
    ttl: Option<i64>,
}

// == File Cache ==
/// File-backed cache engine.
///
/// Owns an in-memory hot layer and delegates durable storage to an injected
/// record store and codec. A value fetched or stored once stays
/// authoritative in the hot layer for the lifetime of the instance; TTLs
/// are checked when a record is loaded from the backing store.
pub struct FileCache {
    /// Durable record storage
    backend: Box<dyn RecordStore>,
    /// Serialization scheme for records
    codec: Box<dyn RecordCodec>,
    /// Already-materialized values, keyed by logical key
    hot: HashMap<String, CacheValue>,
    /// When true, `store` defers durable writes until `commit`
    buffer_enabled: bool,
    /// Writes awaiting replay by `commit`
    pending: Vec<PendingWrite>,
    /// Performance statistics
    stats: CacheStats,
}

impl FileCache {
    // == Constructor ==
    /// Creates a cache engine over the given record store and codec.
    pub fn new(store: impl RecordStore + 'static, codec: impl RecordCodec + 'static) -> Self {
        Self {
            backend: Box::new(store),
            codec: Box::new(codec),
            hot: HashMap::new(),
            buffer_enabled: false,
            pending: Vec::new(),
            stats: CacheStats::new(),
        }
    }

    /// Creates a cache engine from configuration: a [`DirStore`] under the
    /// configured root directory with the JSON record codec.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(DirStore::open(&config.root_dir)?, JsonCodec))
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_hot_entries(self.hot.len());
        stats
    }

    // == Purge Expired ==
    /// Removes every durable record whose TTL has elapsed.
    ///
    /// Maintenance operation for records that expired without ever being
    /// enumerated or fetched again. Never runs implicitly and leaves the
    /// hot layer untouched.
    ///
    /// Returns the number of records removed.
    pub fn purge_expired(&mut self) -> Result<usize> {
        let mut removed = 0;
        for name in self.backend.list()? {
            let record = self.codec.decode(self.backend.as_ref(), &name)?;
            if record.is_expired() {
                self.backend.unlink(&name)?;
                removed += 1;
            }
        }

        if removed > 0 {
            info!(removed, "purged expired cache records");
        } else {
            debug!("no expired cache records to purge");
        }
        Ok(removed)
    }

    /// Validates a key before it can reach the backing store.
    ///
    /// Keys become file names, so anything that could escape the storage
    /// root is rejected here rather than left to the backend.
    fn validate_key(key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(CacheError::InvalidKey("key is empty".to_string()));
        }
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidKey(format!(
                "key exceeds maximum length of {MAX_KEY_LENGTH} bytes"
            )));
        }
        if key.contains(['/', '\\']) || key.contains("..") {
            return Err(CacheError::InvalidKey(format!(
                "key must not contain path separators: {key}"
            )));
        }
        Ok(())
    }

    /// Writes the `{ttl, value}` record for `key` to the backing store.
    fn persist(&mut self, key: &str, value: CacheValue, ttl: Option<i64>) -> Result<()> {
        let name = self.backend.record_name(key);
        let record = CacheRecord::new(value, ttl);
        self.codec.encode(self.backend.as_ref(), &name, &record)?;
        self.stats.record_write();
        debug!(key, ttl, "wrote cache record");
        Ok(())
    }
}

impl Cache for FileCache {
    // == Entry ==
    fn entry(
        &mut self,
        key: &str,
        generator: Generator<'_>,
        ttl: Option<i64>,
    ) -> Result<CacheValue> {
        if !self.exists(key)? {
            let value = CacheValue::from(generator());
            self.store(key, value, ttl)?;
        }

        self.fetch(key)
    }

    // == Store ==
    fn store(&mut self, key: &str, value: CacheValue, ttl: Option<i64>) -> Result<()> {
        Self::validate_key(key)?;
        self.hot.insert(key.to_owned(), value.clone());

        if !self.buffer_enabled {
            return self.persist(key, value, ttl);
        }

        self.pending.push(PendingWrite {
            key: key.to_owned(),
            ttl,
        });
        debug!(key, "buffered cache write");
        Ok(())
    }

    // == Fetch ==
    /// Retrieves a value, preferring the hot layer.
    ///
    /// A durable record whose TTL has elapsed is removed (best effort) and
    /// reported as an expired miss; a successful durable load warms the hot
    /// layer.
    fn fetch(&mut self, key: &str) -> Result<CacheValue> {
        if let Some(value) = self.hot.get(key).cloned() {
            self.stats.record_hit();
            return Ok(value);
        }

        let name = self.backend.record_name(key);
        if self.backend.is_record(&name) {
            let record = self.codec.decode(self.backend.as_ref(), &name)?;

            if record.is_expired() {
                if let Err(error) = self.delete(key) {
                    warn!(key, %error, "failed to remove expired cache record");
                }
                self.stats.record_miss();
                return Err(CacheError::Expired(key.to_owned()));
            }

            self.hot.insert(key.to_owned(), record.value.clone());
            self.stats.record_hit();
            return Ok(record.value);
        }

        self.stats.record_miss();
        Err(CacheError::NotFound(key.to_owned()))
    }

    // == Exists ==
    fn exists(&mut self, key: &str) -> Result<bool> {
        match self.fetch(key) {
            Ok(_) => Ok(true),
            Err(error) if error.is_miss() => Ok(false),
            Err(error) => Err(error),
        }
    }

    // == Delete ==
    fn delete(&mut self, key: &str) -> Result<()> {
        self.hot.remove(key);

        let name = self.backend.record_name(key);
        if self.backend.is_record(&name) {
            self.backend.unlink(&name)?;
            debug!(key, "deleted cache record");
        }
        Ok(())
    }

    // == Keys ==
    fn keys(&mut self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for name in self.backend.list()? {
            if let Some(key) = self.backend.record_key(&name) {
                if self.exists(&key)? {
                    keys.push(key);
                }
            }
        }
        Ok(keys)
    }

    // == Clear ==
    fn clear(&mut self) -> Result<()> {
        let keys = self.keys()?;
        let count = keys.len();
        for key in keys {
            self.delete(&key)?;
        }

        if count > 0 {
            info!(count, "cleared cache");
        }
        Ok(())
    }

    // == Enable Buffer ==
    fn enable_buffer(&mut self) {
        self.pending.clear();
        self.buffer_enabled = true;
        debug!("cache write buffering enabled");
    }

    // == Commit ==
    /// Leaves buffered mode, then replays every pending write with the
    /// current hot-layer value for its key. Keys deleted from the hot layer
    /// since being buffered are skipped.
    fn commit(&mut self) -> Result<()> {
        self.buffer_enabled = false;

        let pending = std::mem::take(&mut self.pending);
        let count = pending.len();
        for write in pending {
            if let Some(value) = self.hot.get(&write.key).cloned() {
                self.persist(&write.key, value, write.ttl)?;
            }
        }

        if count > 0 {
            info!(count, "committed buffered cache writes");
        }
        Ok(())
    }
}
