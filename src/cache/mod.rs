//! Cache Module
//!
//! Provides the bounded key-value table with TTL expiration guardrails.

mod entry;
mod table;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use table::CacheTable;
