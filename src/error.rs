//! Error types for the cache engine
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache engine.
///
/// Every variant is caller-recoverable; a failed `set` leaves the table
/// unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key exceeds the configured maximum length
    #[error("Key is {len} bytes, exceeding the maximum of {max}")]
    KeyTooLong { len: usize, max: usize },

    /// Value exceeds the configured maximum length
    #[error("Value is {len} bytes, exceeding the maximum of {max}")]
    ValueTooLong { len: usize, max: usize },

    /// Table is at its configured maximum entry count
    #[error("Cache is full: {max} entries already stored")]
    CapacityExceeded { max: usize },

    /// Key already present and replace was not requested
    #[error("Key already exists: {0} (set replace to overwrite)")]
    KeyExists(String),

    /// persist/destroy_persisted_data called without a configured persist key
    #[error("No persist key configured; set one through the engine config")]
    NoPersistKey,

    /// The blob store failed to read or write the snapshot
    #[error("Persistence unavailable: {0}")]
    PersistenceUnavailable(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache engine.
pub type Result<T> = std::result::Result<T, CacheError>;
