//! Persistence Module
//!
//! Defines the blob-store collaborator the engine persists snapshots to, and
//! the snapshot codec.
//!
//! The store is injected at engine construction, so independent engines can
//! target independent or shared backends. Snapshots are encoded as a JSON
//! pair list `[[key, {"expiresAt": ms, "value": ...}], ...]`, which preserves
//! key uniqueness and millisecond expiries exactly.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::cache::CacheEntry;
use crate::error::{CacheError, Result};

// == Blob Store Trait ==
/// A synchronous string-keyed blob store.
///
/// The engine treats it as reliable local storage (e.g. platform-provided
/// persistent key-value storage); calls are expected to be bounded-latency.
/// Implementations that can fail report [`CacheError::PersistenceUnavailable`].
pub trait BlobStore: Send + Sync {
    /// Reads the blob stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, overwriting any prior blob.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes the blob under `key`; a no-op if absent.
    fn delete(&self, key: &str) -> Result<()>;
}

// == Memory Blob Store ==
/// In-memory [`BlobStore`] for tests and embedders without a platform store.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryBlobStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|e| CacheError::PersistenceUnavailable(e.to_string()))?;
        Ok(blobs.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|e| CacheError::PersistenceUnavailable(e.to_string()))?;
        blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|e| CacheError::PersistenceUnavailable(e.to_string()))?;
        blobs.remove(key);
        Ok(())
    }
}

// == Snapshot Codec ==
/// Serializes a table's entries into the snapshot blob.
pub fn encode_snapshot(entries: &[(String, CacheEntry)]) -> Result<String> {
    serde_json::to_string(entries).map_err(|e| CacheError::PersistenceUnavailable(e.to_string()))
}

/// Deserializes a snapshot blob back into an entry pair list.
pub fn decode_snapshot(blob: &str) -> Result<Vec<(String, CacheEntry)>> {
    serde_json::from_str(blob).map_err(|e| CacheError::PersistenceUnavailable(e.to_string()))
}
