//! Record Codec Module
//!
//! JSON serialization for cache records.

use super::{RecordCodec, RecordStore};
use crate::cache::CacheRecord;
use crate::error::Result;

// == Json Codec ==
/// Encodes records as the flat `{"ttl": ..., "value": ...}` JSON object.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;

impl RecordCodec for JsonCodec {
    fn encode(&self, store: &dyn RecordStore, name: &str, record: &CacheRecord) -> Result<()> {
        let bytes = serde_json::to_vec(record)?;
        store.write(name, &bytes)
    }

    fn decode(&self, store: &dyn RecordStore, name: &str) -> Result<CacheRecord> {
        let bytes = store.read(name)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
