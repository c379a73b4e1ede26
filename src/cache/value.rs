//! Cache Value Module
//!
//! The shared value container handed out by the cache engine.

use std::ops::Deref;
use std::sync::Arc;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// The raw payload shape: a flat JSON object map.
pub type ValueMap = serde_json::Map<String, serde_json::Value>;

// == Cache Value ==
/// Shared handle to a cached payload.
///
/// Cloning is cheap and every clone refers to the same underlying map, so
/// repeated fetches of a hot key hand out the same instance rather than
/// copies of it.
#[derive(Debug, Clone)]
pub struct CacheValue(Arc<ValueMap>);

impl CacheValue {
    /// Wraps a raw map into the shared container.
    pub fn new(map: ValueMap) -> Self {
        Self(Arc::new(map))
    }

    // == Same Instance ==
    /// Whether two handles refer to the same underlying map.
    pub fn same_instance(a: &CacheValue, b: &CacheValue) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl Deref for CacheValue {
    type Target = ValueMap;

    fn deref(&self) -> &ValueMap {
        &self.0
    }
}

impl From<ValueMap> for CacheValue {
    fn from(map: ValueMap) -> Self {
        Self::new(map)
    }
}

/// Content equality; use [`CacheValue::same_instance`] for identity.
impl PartialEq for CacheValue {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

// Serialized as the bare map, so the container never leaks into records.
impl Serialize for CacheValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CacheValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(CacheValue::new(ValueMap::deserialize(deserializer)?))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn sample_map() -> ValueMap {
        let mut map = ValueMap::new();
        map.insert("foo".to_string(), Value::String("bar".to_string()));
        map
    }

    #[test]
    fn test_clone_shares_instance() {
        let value = CacheValue::new(sample_map());
        let clone = value.clone();
        assert!(CacheValue::same_instance(&value, &clone));
    }

    #[test]
    fn test_equal_content_distinct_instances() {
        let a = CacheValue::new(sample_map());
        let b = CacheValue::new(sample_map());
        assert_eq!(a, b);
        assert!(!CacheValue::same_instance(&a, &b));
    }

    #[test]
    fn test_deref_reads_map() {
        let value = CacheValue::new(sample_map());
        assert_eq!(value.get("foo"), Some(&json!("bar")));
        assert_eq!(value.len(), 1);
    }

    #[test]
    fn test_serializes_as_bare_map() {
        let value = CacheValue::new(sample_map());
        let serialized = serde_json::to_value(&value).unwrap();
        assert_eq!(serialized, json!({"foo": "bar"}));
    }

    #[test]
    fn test_deserializes_from_bare_map() {
        let value: CacheValue = serde_json::from_str(r#"{"foo": "bar"}"#).unwrap();
        assert_eq!(value, CacheValue::new(sample_map()));
    }
}
