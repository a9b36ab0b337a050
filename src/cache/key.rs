//! Physical key derivation.
//!
//! Logical keys are hashed so arbitrary caller strings (URLs, JSON, query
//! parameters) map to short, store-safe keys under a namespace.

use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Hex characters kept from the SHA-256 digest.
pub const DIGEST_LEN: usize = 16;

/// Prefix of every tag membership set.
pub const TAG_KEY_PREFIX: &str = "tag";

/// Derives `prefix:digest` from a logical key.
pub fn generate_key(key: &str, prefix: &str) -> String {
    let hash = Sha256::digest(key.as_bytes());
    let digest = format!("{hash:x}");
    format!("{prefix}:{}", &digest[..DIGEST_LEN])
}

/// Derives a physical key from any serializable value.
///
/// Object fields are sorted recursively first, so two values that differ
/// only in field order share a key. Values that fail to serialize hash as
/// `null`.
pub fn key_from_object<T: Serialize + ?Sized>(value: &T, prefix: &str) -> String {
    let canonical = serde_json::to_value(value)
        .map(sort_object_keys)
        .unwrap_or(Value::Null);
    generate_key(&canonical.to_string(), prefix)
}

/// Key of the membership set for `tag`.
pub fn tag_key(tag: &str) -> String {
    format!("{TAG_KEY_PREFIX}:{tag}")
}

fn sort_object_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let sorted: Map<String, Value> = entries
                .into_iter()
                .map(|(k, v)| (k, sort_object_keys(v)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_object_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generate_key_shape() {
        let key = generate_key("products:list", "app");
        let (prefix, digest) = key.split_once(':').unwrap();
        assert_eq!(prefix, "app");
        assert_eq!(digest.len(), DIGEST_LEN);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_generate_key_known_digest() {
        // sha256("hello") = 2cf24dba5fb0a30e...
        assert_eq!(generate_key("hello", "app"), "app:2cf24dba5fb0a30e");
    }

    #[test]
    fn test_prefix_separates_namespaces() {
        assert_ne!(generate_key("k", "app"), generate_key("k", "admin"));
    }

    #[test]
    fn test_key_from_object_ignores_field_order() {
        let a = json!({"method": "list", "args": {"page": 1, "limit": 20}});
        let b = json!({"args": {"limit": 20, "page": 1}, "method": "list"});
        assert_eq!(key_from_object(&a, "app"), key_from_object(&b, "app"));
    }

    #[test]
    fn test_key_from_object_keeps_array_order() {
        let a = json!({"ids": [1, 2]});
        let b = json!({"ids": [2, 1]});
        assert_ne!(key_from_object(&a, "app"), key_from_object(&b, "app"));
    }

    #[test]
    fn test_tag_key() {
        assert_eq!(tag_key("products"), "tag:products");
    }
}
