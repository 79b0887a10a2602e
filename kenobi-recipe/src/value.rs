//! Helpers for generic recipe values.

use serde_json::Value;

/// Whether a value counts as empty.
///
/// Empty values are treated as absent options: null, `false`, `0`, `""`,
/// `"0"` and empty lists or maps.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Whether a feature toggle requests the feature.
///
/// Any value other than null or `false` requests it, so option maps and
/// instance lists count as a request.
pub fn is_requested(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

/// Convert a value to a short string for messages and templates.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
