//! Property-Based Tests for the Cache Table
//!
//! Uses proptest to verify the table's guardrail and lifecycle invariants.

use proptest::prelude::*;

use crate::cache::CacheTable;
use crate::config::Config;
use crate::error::CacheError;

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 16;
const TEST_MAX_KEY_LENGTH: usize = 10;
const TEST_MAX_VALUE_LENGTH: usize = 64;

fn test_config() -> Config {
    Config {
        max_entries: TEST_MAX_ENTRIES,
        max_key_length: TEST_MAX_KEY_LENGTH,
        max_value_length: TEST_MAX_VALUE_LENGTH,
        ..Config::default()
    }
}

// == Strategies ==
/// Generates valid cache keys (non-empty, within length limit)
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,10}"
}

/// Generates valid cache values (within length limit)
fn valid_value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,64}"
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String, replace: bool },
    Get { key: String },
    Flush { key: String },
    FlushAll,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (valid_key_strategy(), valid_value_strategy(), any::<bool>())
            .prop_map(|(key, value, replace)| CacheOp::Set { key, value, replace }),
        valid_key_strategy().prop_map(|key| CacheOp::Get { key }),
        valid_key_strategy().prop_map(|key| CacheOp::Flush { key }),
        Just(CacheOp::FlushAll),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any valid key-value pair, storing and then retrieving it returns
    // the exact value that was stored.
    #[test]
    fn prop_roundtrip_storage(key in valid_key_strategy(), value in valid_value_strategy()) {
        let mut table = CacheTable::new(&test_config());

        table.set(key.clone(), value.clone(), false, None).unwrap();

        prop_assert_eq!(table.get(&key), Some(value));
    }

    // A second set without replace fails with KeyExists and the original
    // value is retained.
    #[test]
    fn prop_key_exists_preserves_value(
        key in valid_key_strategy(),
        v1 in valid_value_strategy(),
        v2 in valid_value_strategy(),
    ) {
        let mut table = CacheTable::new(&test_config());

        table.set(key.clone(), v1.clone(), false, None).unwrap();
        let result = table.set(key.clone(), v2, false, None);

        prop_assert_eq!(result, Err(CacheError::KeyExists(key.clone())));
        prop_assert_eq!(table.get(&key), Some(v1));
    }

    // A set with replace always wins, regardless of the prior value.
    #[test]
    fn prop_replace_overwrites(
        key in valid_key_strategy(),
        v1 in valid_value_strategy(),
        v2 in valid_value_strategy(),
    ) {
        let mut table = CacheTable::new(&test_config());

        table.set(key.clone(), v1, false, None).unwrap();
        table.set(key.clone(), v2.clone(), true, None).unwrap();

        prop_assert_eq!(table.get(&key), Some(v2));
    }

    // An over-long key is always rejected and never mutates the table.
    #[test]
    fn prop_oversized_key_rejected(
        suffix in "[a-z0-9]{1,10}",
        value in valid_value_strategy(),
    ) {
        let mut table = CacheTable::new(&test_config());
        let long_key = format!("{}{}", "x".repeat(TEST_MAX_KEY_LENGTH), suffix);

        let result = table.set(long_key.clone(), value, false, None);

        prop_assert_eq!(result, Err(CacheError::KeyTooLong {
            len: long_key.len(),
            max: TEST_MAX_KEY_LENGTH,
        }));
        prop_assert!(table.is_empty());
    }

    // For any sequence of operations, the table never exceeds its configured
    // capacity, and a failed set leaves the length unchanged.
    #[test]
    fn prop_capacity_invariant(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut table = CacheTable::new(&test_config());

        for op in ops {
            let len_before = table.len();
            match op {
                CacheOp::Set { key, value, replace } => {
                    if table.set(key, value, replace, None).is_err() {
                        prop_assert_eq!(table.len(), len_before, "Failed set mutated the table");
                    }
                }
                CacheOp::Get { key } => {
                    let _ = table.get(&key);
                }
                CacheOp::Flush { key } => {
                    table.flush(&key);
                }
                CacheOp::FlushAll => {
                    table.flush_all();
                    prop_assert!(table.is_empty());
                }
            }
            prop_assert!(table.len() <= TEST_MAX_ENTRIES, "Capacity exceeded");
        }
    }
}
