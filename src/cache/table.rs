//! Cache Table Module
//!
//! The core bounded key-value table with TTL expiration and size guardrails.

use std::collections::HashMap;

use crate::cache::CacheEntry;
use crate::config::Config;
use crate::error::{CacheError, Result};

// == Cache Table ==
/// Bounded key-value storage with per-entry expiry.
///
/// The table enforces its guardrails on every mutation: key and value length
/// limits, and the maximum entry count. Expired entries are removed by the
/// periodic sweep, or lazily on read when `flush_on_get` is set.
#[derive(Debug)]
pub struct CacheTable {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Maximum key length in bytes
    max_key_length: usize,
    /// Maximum value length in bytes
    max_value_length: usize,
    /// Default TTL in seconds for entries without explicit TTL
    default_ttl: u64,
    /// Evict expired entries on read instead of waiting for the sweep
    flush_on_get: bool,
}

impl CacheTable {
    // == Constructor ==
    /// Creates an empty CacheTable with the configured guardrails.
    pub fn new(config: &Config) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries: config.max_entries,
            max_key_length: config.max_key_length,
            max_value_length: config.max_value_length,
            default_ttl: config.default_ttl,
            flush_on_get: config.flush_on_get,
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// With `flush_on_get` set, an expired entry is evicted here and `None`
    /// is returned. Without it, an expired-but-unswept entry is still
    /// returned until the next sweep pass removes it; eviction latency is
    /// traded for a cheaper read path.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let entry = self.entries.get(key)?;

        if self.flush_on_get && entry.is_expired() {
            self.entries.remove(key);
            return None;
        }

        Some(entry.value.clone())
    }

    // == Set ==
    /// Stores a key-value pair.
    ///
    /// Validation order is fixed, first failure wins and leaves the table
    /// unchanged: key length, value length, capacity, key-exists. The
    /// capacity check only applies when the key is not already present, so
    /// replacing an existing key at capacity still succeeds.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `replace` - Allow overwriting an existing key
    /// * `ttl` - Optional TTL in seconds (uses the default TTL if None)
    pub fn set(&mut self, key: String, value: String, replace: bool, ttl: Option<u64>) -> Result<()> {
        if key.len() > self.max_key_length {
            return Err(CacheError::KeyTooLong {
                len: key.len(),
                max: self.max_key_length,
            });
        }

        if value.len() > self.max_value_length {
            return Err(CacheError::ValueTooLong {
                len: value.len(),
                max: self.max_value_length,
            });
        }

        let exists = self.entries.contains_key(&key);

        if !exists && self.entries.len() >= self.max_entries {
            return Err(CacheError::CapacityExceeded {
                max: self.max_entries,
            });
        }

        if exists && !replace {
            return Err(CacheError::KeyExists(key));
        }

        let entry = CacheEntry::new(value, ttl.unwrap_or(self.default_ttl));
        self.entries.insert(key, entry);

        Ok(())
    }

    // == Flush ==
    /// Removes an entry by key; a no-op if the key is absent.
    pub fn flush(&mut self, key: &str) {
        self.entries.remove(key);
    }

    // == Flush All ==
    /// Empties the table.
    pub fn flush_all(&mut self) {
        self.entries.clear();
    }

    // == Get All ==
    /// Returns a cloned read view of the full table, including expiries.
    pub fn get_all(&self) -> HashMap<String, CacheEntry> {
        self.entries.clone()
    }

    // == Sweep Expired ==
    /// Removes all expired entries from the table.
    ///
    /// O(n) in the table size, which is bounded by `max_entries`.
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
        }

        count
    }

    // == Snapshot Export ==
    /// Exports all entries as an ordered pair list for the snapshot codec.
    pub fn export_entries(&self) -> Vec<(String, CacheEntry)> {
        self.entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.clone()))
            .collect()
    }

    // == Snapshot Restore ==
    /// Loads entries from a decoded snapshot, replacing the current table.
    ///
    /// Restored entries are taken verbatim; guardrails are not re-validated
    /// against persisted data.
    pub fn load_entries(&mut self, entries: Vec<(String, CacheEntry)>) {
        self.entries = entries.into_iter().collect();
    }

    // == Length ==
    /// Returns the current number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
