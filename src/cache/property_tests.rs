//! Property-Based Tests for Cache Module
//!
//! Uses proptest for key derivation, expiry and statistics invariants.

use proptest::prelude::*;
use serde_json::{json, Map, Value};

use crate::cache::stats::hit_rate_percent;
use crate::cache::{generate_key, key_from_object, CacheEntry, DIGEST_LEN};

// == Strategies ==
fn logical_key_strategy() -> impl Strategy<Value = String> {
    "\\PC{0,128}".prop_map(|s| s)
}

fn prefix_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,12}".prop_map(|s| s)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Same logical key and prefix always give the same physical key.
    #[test]
    fn prop_key_is_deterministic(key in logical_key_strategy(), prefix in prefix_strategy()) {
        prop_assert_eq!(generate_key(&key, &prefix), generate_key(&key, &prefix));
    }

    // Physical keys are `prefix:` followed by 16 lowercase hex chars.
    #[test]
    fn prop_key_shape(key in logical_key_strategy(), prefix in prefix_strategy()) {
        let physical = generate_key(&key, &prefix);
        let digest = physical.strip_prefix(&format!("{prefix}:")).unwrap();
        prop_assert_eq!(digest.len(), DIGEST_LEN);
        prop_assert!(digest.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }

    // Distinct logical keys give distinct physical keys.
    #[test]
    fn prop_distinct_keys_do_not_collide(
        a in logical_key_strategy(),
        b in logical_key_strategy(),
        prefix in prefix_strategy(),
    ) {
        prop_assume!(a != b);
        prop_assert_ne!(generate_key(&a, &prefix), generate_key(&b, &prefix));
    }

    // Field order never changes the derived key.
    #[test]
    fn prop_object_key_ignores_field_order(
        fields in prop::collection::btree_map("[a-z]{1,8}", 0i64..1000, 1..8),
    ) {
        let forward: Map<String, Value> =
            fields.iter().map(|(k, v)| (k.clone(), json!(v))).collect();
        let reversed: Map<String, Value> =
            fields.iter().rev().map(|(k, v)| (k.clone(), json!(v))).collect();

        prop_assert_eq!(
            key_from_object(&Value::Object(forward), "app"),
            key_from_object(&Value::Object(reversed), "app")
        );
    }

    // An entry is live up to and including ttl*1000 ms, expired after.
    #[test]
    fn prop_expiry_boundary(created in 0u64..1_000_000_000, ttl in 1u64..100_000) {
        let entry = CacheEntry::new((), created, ttl, None);
        prop_assert!(!entry.is_expired_at(created));
        prop_assert!(!entry.is_expired_at(created + ttl * 1000));
        prop_assert!(entry.is_expired_at(created + ttl * 1000 + 1));
    }

    // Hit rate stays within 0..=100 and has at most two decimals.
    #[test]
    fn prop_hit_rate_bounds(total in 1u64..10_000, hits_frac in 0.0f64..=1.0) {
        let hits = (total as f64 * hits_frac) as u64;
        let rate = hit_rate_percent(hits, total);
        prop_assert!((0.0..=100.0).contains(&rate));
        prop_assert!(((rate * 100.0).round() - rate * 100.0).abs() < 1e-6);
    }
}
