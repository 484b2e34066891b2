//! Cache Engine Module
//!
//! Ties the cache table, the sweep task, and the persistence collaborator
//! together behind the public engine API.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheEntry, CacheTable};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::persist::{decode_snapshot, encode_snapshot, BlobStore};
use crate::tasks::spawn_sweep_task;

// == Set Options ==
/// Options for [`Cache::set`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SetOptions {
    /// Allow overwriting an existing key
    pub replace: bool,
    /// TTL in seconds; the configured default TTL when None
    pub ttl: Option<u64>,
}

// == Cache Engine ==
/// The TTL cache engine.
///
/// Owns the table behind a single `RwLock`, so every operation (including the
/// sweep pass) runs as a whole-call critical section; `set` with `replace`
/// acts as a compare-like primitive under that lock. The engine also owns the
/// sweep task handle and guarantees its cancellation on [`Cache::destroy`].
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use stash::{Cache, Config, MemoryBlobStore, SetOptions};
///
/// #[tokio::main]
/// async fn main() -> stash::Result<()> {
///     let mut cache = Cache::new(Config::default(), Arc::new(MemoryBlobStore::new()))?;
///     cache.set("hello", "world", SetOptions::default()).await?;
///     assert_eq!(cache.get("hello").await, Some("world".to_string()));
///     cache.destroy(false).await?;
///     Ok(())
/// }
/// ```
pub struct Cache {
    /// Shared table, also held by the sweep task
    table: Arc<RwLock<CacheTable>>,
    /// Injected persistence backend
    blob_store: Arc<dyn BlobStore>,
    /// Resolved snapshot key; None when persistence is disabled
    persist_key: Option<String>,
    /// Sweep task handle; taken on destroy so repeat destroys are harmless
    sweep_handle: Option<JoinHandle<()>>,
}

impl Cache {
    // == Constructor ==
    /// Creates a new engine from a configuration and a blob store.
    ///
    /// When a persist key is configured, a snapshot is loaded from the blob
    /// store if one exists; a missing snapshot means the engine starts empty
    /// and is not an error. Restored entries are not re-validated against the
    /// guardrails. The sweep task is always started.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: Config, blob_store: Arc<dyn BlobStore>) -> Result<Self> {
        let persist_key = config.persist_key.resolve();
        let mut table = CacheTable::new(&config);

        if let Some(key) = &persist_key {
            match blob_store.get(key)? {
                Some(blob) => {
                    let entries = decode_snapshot(&blob)?;
                    info!("Restored {} entries from snapshot '{}'", entries.len(), key);
                    table.load_entries(entries);
                }
                None => debug!("No snapshot found under '{}', starting empty", key),
            }
        }

        let table = Arc::new(RwLock::new(table));
        let sweep_handle = spawn_sweep_task(table.clone(), config.sweep_interval);

        Ok(Self {
            table,
            blob_store,
            persist_key,
            sweep_handle: Some(sweep_handle),
        })
    }

    // == Get ==
    /// Retrieves the value stored under `key`, if any.
    ///
    /// With `flush_on_get` configured, an expired entry is evicted here;
    /// otherwise an expired-but-unswept entry is still returned until the
    /// next sweep pass.
    pub async fn get(&self, key: &str) -> Option<String> {
        // Write lock: flush_on_get may evict
        let mut table = self.table.write().await;
        table.get(key)
    }

    // == Set ==
    /// Stores a key-value pair.
    ///
    /// Validates in order (first failure wins, table unchanged): key length,
    /// value length, capacity (only for new keys), key-exists without
    /// `replace`. The expiry is `now + (options.ttl or the default TTL)`.
    pub async fn set(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
        options: SetOptions,
    ) -> Result<()> {
        let mut table = self.table.write().await;
        table.set(key.into(), value.into(), options.replace, options.ttl)
    }

    // == Flush ==
    /// Removes the entry under `key`; a no-op if absent.
    pub async fn flush(&self, key: &str) {
        let mut table = self.table.write().await;
        table.flush(key);
    }

    // == Flush All ==
    /// Empties the table.
    pub async fn flush_all(&self) {
        let mut table = self.table.write().await;
        table.flush_all();
    }

    // == Get All ==
    /// Returns a read view of the full table, values and expiries included.
    pub async fn get_all(&self) -> HashMap<String, CacheEntry> {
        let table = self.table.read().await;
        table.get_all()
    }

    // == Length ==
    /// Returns the current number of entries.
    pub async fn len(&self) -> usize {
        let table = self.table.read().await;
        table.len()
    }

    /// Returns true if the table is empty.
    pub async fn is_empty(&self) -> bool {
        let table = self.table.read().await;
        table.is_empty()
    }

    // == Persist ==
    /// Serializes the whole table to the blob store, overwriting any prior
    /// snapshot.
    ///
    /// Fails with [`CacheError::NoPersistKey`] when persistence is disabled.
    pub async fn persist(&self) -> Result<()> {
        let key = self.persist_key.as_ref().ok_or(CacheError::NoPersistKey)?;

        let entries = {
            let table = self.table.read().await;
            table.export_entries()
        };
        let blob = encode_snapshot(&entries)?;
        self.blob_store.set(key, &blob)?;

        info!("Persisted {} entries to snapshot '{}'", entries.len(), key);
        Ok(())
    }

    // == Destroy Persisted Data ==
    /// Deletes the snapshot from the blob store.
    ///
    /// Fails with [`CacheError::NoPersistKey`] when persistence is disabled.
    pub fn destroy_persisted_data(&self) -> Result<()> {
        let key = self.persist_key.as_ref().ok_or(CacheError::NoPersistKey)?;
        self.blob_store.delete(key)
    }

    // == Destroy ==
    /// Tears the engine down: cancels the sweep task, empties the table, and
    /// optionally erases the persisted snapshot.
    ///
    /// No sweep pass can mutate the table after this returns: the task is
    /// aborted first, and acquiring the write lock then waits out any pass
    /// already holding it. Calling destroy again is harmless.
    pub async fn destroy(&mut self, include_persisted_data: bool) -> Result<()> {
        if let Some(handle) = self.sweep_handle.take() {
            handle.abort();
            info!("Sweep task cancelled");
        }

        {
            let mut table = self.table.write().await;
            table.flush_all();
        }

        if include_persisted_data {
            self.destroy_persisted_data()?;
        }

        Ok(())
    }
}

impl Drop for Cache {
    fn drop(&mut self) {
        // An engine dropped without destroy() must not leak its sweep task
        if let Some(handle) = self.sweep_handle.take() {
            handle.abort();
        }
    }
}
