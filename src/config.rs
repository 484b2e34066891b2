//! Configuration Module
//!
//! Handles loading and managing engine configuration from environment variables.

use std::env;

/// Blob-store key used when persistence is enabled without an explicit key.
pub const DEFAULT_PERSIST_KEY: &str = "@stash/cache";

// == Persist Key ==
/// Where (and whether) the engine persists its snapshot.
///
/// Resolved once at engine construction into a plain optional key so the
/// persistence paths never have to re-interpret the variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PersistKey {
    /// Persistence disabled; `persist()` and `destroy_persisted_data()` fail
    #[default]
    Disabled,
    /// Persist under [`DEFAULT_PERSIST_KEY`]
    DefaultKey,
    /// Persist under a caller-chosen key
    Custom(String),
}

impl PersistKey {
    /// Resolves the variant into the blob-store key to use, if any.
    pub fn resolve(&self) -> Option<String> {
        match self {
            PersistKey::Disabled => None,
            PersistKey::DefaultKey => Some(DEFAULT_PERSIST_KEY.to_string()),
            PersistKey::Custom(key) => Some(key.clone()),
        }
    }
}

// == Config ==
/// Engine configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// Immutable once handed to the engine.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default TTL in seconds for entries without explicit TTL
    pub default_ttl: u64,
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Maximum allowed key length in bytes
    pub max_key_length: usize,
    /// Maximum allowed value length in bytes
    pub max_value_length: usize,
    /// Background sweep task interval in seconds
    pub sweep_interval: u64,
    /// Evict expired entries lazily on read instead of waiting for the sweep
    pub flush_on_get: bool,
    /// Snapshot persistence target
    pub persist_key: PersistKey,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 600)
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 100)
    /// - `MAX_KEY_LENGTH` - Maximum key length in bytes (default: 10)
    /// - `MAX_VALUE_LENGTH` - Maximum value length in bytes (default: 1000)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 5)
    /// - `FLUSH_ON_GET` - Evict expired entries on read (default: false)
    /// - `PERSIST_KEY` - unset disables persistence; `true`/`1` uses the
    ///   default key; any other value is used as the key itself
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_ttl: env::var("DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_ttl),
            max_entries: env::var("MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_entries),
            max_key_length: env::var("MAX_KEY_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_key_length),
            max_value_length: env::var("MAX_VALUE_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_value_length),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sweep_interval),
            flush_on_get: env::var("FLUSH_ON_GET")
                .ok()
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.flush_on_get),
            persist_key: match env::var("PERSIST_KEY").ok() {
                None => PersistKey::Disabled,
                Some(v) if v == "true" || v == "1" => PersistKey::DefaultKey,
                Some(v) => PersistKey::Custom(v),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl: 600,
            max_entries: 100,
            max_key_length: 10,
            max_value_length: 1000,
            sweep_interval: 5,
            flush_on_get: false,
            persist_key: PersistKey::Disabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.default_ttl, 600);
        assert_eq!(config.max_entries, 100);
        assert_eq!(config.max_key_length, 10);
        assert_eq!(config.max_value_length, 1000);
        assert_eq!(config.sweep_interval, 5);
        assert!(!config.flush_on_get);
        assert_eq!(config.persist_key, PersistKey::Disabled);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("DEFAULT_TTL");
        env::remove_var("MAX_ENTRIES");
        env::remove_var("MAX_KEY_LENGTH");
        env::remove_var("MAX_VALUE_LENGTH");
        env::remove_var("SWEEP_INTERVAL");
        env::remove_var("FLUSH_ON_GET");
        env::remove_var("PERSIST_KEY");

        let config = Config::from_env();
        assert_eq!(config.default_ttl, 600);
        assert_eq!(config.max_entries, 100);
        assert_eq!(config.sweep_interval, 5);
        assert_eq!(config.persist_key, PersistKey::Disabled);
    }

    #[test]
    fn test_persist_key_resolve() {
        assert_eq!(PersistKey::Disabled.resolve(), None);
        assert_eq!(
            PersistKey::DefaultKey.resolve(),
            Some(DEFAULT_PERSIST_KEY.to_string())
        );
        assert_eq!(
            PersistKey::Custom("snapshots/a".to_string()).resolve(),
            Some("snapshots/a".to_string())
        );
    }
}
