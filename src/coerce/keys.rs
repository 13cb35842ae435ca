//! Key casing conversion

use crate::types::{JsonObject, JsonValue};
use once_cell::sync::Lazy;
use regex::Regex;

static CASE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new("([a-z0-9])([A-Z])").expect("valid case boundary regex"));

/// Convert a camelCase wire key to snake_case
///
/// A `_` is inserted wherever a lowercase letter or digit is directly
/// followed by an uppercase letter, then the whole key is lowercased.
/// Consecutive capitals are not split: `recordID` becomes `record_id`.
pub fn to_local_key(key: &str) -> String {
    CASE_BOUNDARY.replace_all(key, "${1}_${2}").to_lowercase()
}

/// Recursively convert every object key in a JSON value to snake_case
///
/// Arrays are walked element-wise; scalars pass through unchanged.
pub fn normalize_keys_deep(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => JsonValue::Object(
            map.iter()
                .map(|(key, inner)| (to_local_key(key), normalize_keys_deep(inner)))
                .collect::<JsonObject>(),
        ),
        JsonValue::Array(items) => JsonValue::Array(items.iter().map(normalize_keys_deep).collect()),
        other => other.clone(),
    }
}
