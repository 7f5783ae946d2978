//! Lookups over loosely-shaped JSON from third-party APIs.

use serde_json::Value;

/// Non-empty string at `key`.
pub fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// First non-empty string among `keys`, tried in order.
pub fn first_str<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| str_field(value, k))
}

/// Present and not JSON null.
pub fn non_null<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| !v.is_null())
}
