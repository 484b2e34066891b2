//! Stash - A bounded in-process TTL key-value cache
//!
//! Provides a string-keyed cache with per-entry expiration, a background
//! sweep task, and optional snapshot persistence to a pluggable blob store.

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod persist;
pub mod tasks;

pub use config::{Config, PersistKey};
pub use engine::{Cache, SetOptions};
pub use error::{CacheError, Result};
pub use persist::{BlobStore, MemoryBlobStore};
pub use tasks::spawn_sweep_task;
