//! Cache Registry Module
//!
//! Routes named cache engines and fans out bulk operations.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::Cache;
use crate::error::{CacheError, Result};

// == Cache Registry ==
/// Flat mapping from name to cache engine.
///
/// A plain owned value: it belongs to whichever component constructs it and
/// is passed along explicitly, never kept as a process-wide singleton.
#[derive(Default)]
pub struct CacheRegistry {
    /// Registered caches by name
    caches: HashMap<String, Box<dyn Cache>>,
    /// Names in registration order, for deterministic fan-out
    order: Vec<String>,
}

impl CacheRegistry {
    // == Constructor ==
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // == Register ==
    /// Registers a cache under a name.
    ///
    /// Re-registering a name replaces the previous cache; the name keeps its
    /// original position in the fan-out order.
    pub fn register_cache(&mut self, name: impl Into<String>, cache: impl Cache + 'static) {
        let name = name.into();
        if !self.caches.contains_key(&name) {
            self.order.push(name.clone());
        }
        debug!(name = %name, "registered cache");
        self.caches.insert(name, Box::new(cache));
    }

    // == Retrieve ==
    /// Retrieves a registered cache by name.
    pub fn retrieve_cache(&mut self, name: &str) -> Result<&mut (dyn Cache + '_)> {
        match self.caches.get_mut(name) {
            Some(cache) => Ok(cache.as_mut()),
            None => Err(CacheError::NotRegistered(name.to_owned())),
        }
    }

    // == Clear All ==
    /// Invokes `clear` on every registered cache in registration order.
    pub fn clear_all_caches(&mut self) -> Result<()> {
        for name in &self.order {
            if let Some(cache) = self.caches.get_mut(name) {
                cache.clear()?;
            }
        }
        Ok(())
    }

    // == Length ==
    /// Number of registered caches.
    pub fn len(&self) -> usize {
        self.caches.len()
    }

    // == Is Empty ==
    /// True when no caches are registered.
    pub fn is_empty(&self) -> bool {
        self.caches.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::cache::{CacheValue, FileCache, Generator, ValueMap};
    use crate::storage::memory::MemStore;
    use crate::storage::JsonCodec;
    use serde_json::json;

    /// Stub cache that records `clear` calls, standing in for any engine.
    struct StubCache {
        marker: &'static str,
        cleared: Rc<Cell<usize>>,
    }

    impl StubCache {
        fn new(marker: &'static str) -> (Self, Rc<Cell<usize>>) {
            let cleared = Rc::new(Cell::new(0));
            (
                Self {
                    marker,
                    cleared: Rc::clone(&cleared),
                },
                cleared,
            )
        }
    }

    impl Cache for StubCache {
        fn entry(
            &mut self,
            _key: &str,
            generator: Generator<'_>,
            _ttl: Option<i64>,
        ) -> crate::error::Result<CacheValue> {
            Ok(CacheValue::from(generator()))
        }

        fn store(
            &mut self,
            _key: &str,
            _value: CacheValue,
            _ttl: Option<i64>,
        ) -> crate::error::Result<()> {
            Ok(())
        }

        fn fetch(&mut self, key: &str) -> crate::error::Result<CacheValue> {
            Err(CacheError::NotFound(key.to_owned()))
        }

        fn exists(&mut self, _key: &str) -> crate::error::Result<bool> {
            Ok(false)
        }

        fn delete(&mut self, _key: &str) -> crate::error::Result<()> {
            Ok(())
        }

        fn keys(&mut self) -> crate::error::Result<Vec<String>> {
            Ok(vec![self.marker.to_string()])
        }

        fn clear(&mut self) -> crate::error::Result<()> {
            self.cleared.set(self.cleared.get() + 1);
            Ok(())
        }

        fn enable_buffer(&mut self) {}

        fn commit(&mut self) -> crate::error::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_register_and_retrieve() {
        let mut registry = CacheRegistry::new();
        let (stub, _) = StubCache::new("a");

        registry.register_cache("pages", stub);

        let cache = registry.retrieve_cache("pages").unwrap();
        assert_eq!(cache.keys().unwrap(), vec!["a".to_string()]);
    }

    #[test]
    fn test_retrieve_unregistered_name() {
        let mut registry = CacheRegistry::new();

        let result = registry.retrieve_cache("missing");
        assert!(matches!(result, Err(CacheError::NotRegistered(_))));
    }

    #[test]
    fn test_reregistering_replaces_cache() {
        let mut registry = CacheRegistry::new();
        let (first, first_cleared) = StubCache::new("first");
        let (second, _) = StubCache::new("second");

        registry.register_cache("pages", first);
        registry.register_cache("pages", second);

        assert_eq!(registry.len(), 1);
        let cache = registry.retrieve_cache("pages").unwrap();
        assert_eq!(cache.keys().unwrap(), vec!["second".to_string()]);

        // The replaced cache is gone and never cleared.
        registry.clear_all_caches().unwrap();
        assert_eq!(first_cleared.get(), 0);
    }

    #[test]
    fn test_clear_all_caches_clears_each_once() {
        let mut registry = CacheRegistry::new();
        let (a, a_cleared) = StubCache::new("a");
        let (b, b_cleared) = StubCache::new("b");

        registry.register_cache("a", a);
        registry.register_cache("b", b);

        registry.clear_all_caches().unwrap();

        assert_eq!(a_cleared.get(), 1);
        assert_eq!(b_cleared.get(), 1);
    }

    #[test]
    fn test_registry_routes_to_real_engine() {
        let mut registry = CacheRegistry::new();
        registry.register_cache("pages", FileCache::new(MemStore::new(), JsonCodec));

        let cache = registry.retrieve_cache("pages").unwrap();
        let mut map = ValueMap::new();
        map.insert("data".to_string(), json!("value"));
        cache.store("key1", CacheValue::new(map), None).unwrap();

        let first = cache.fetch("key1").unwrap();
        let second = cache.fetch("key1").unwrap();
        assert!(CacheValue::same_instance(&first, &second));
    }

    #[test]
    fn test_empty_registry() {
        let registry = CacheRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }
}
