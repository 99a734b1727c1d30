//! Parameter encoding for query strings and form bodies.
//!
//! Mollie's v1 API takes `application/x-www-form-urlencoded` bodies and
//! expects nested objects in bracket notation, so
//! `{"metadata": {"order_id": 112233}}` travels as `metadata[order_id]=112233`.

use serde_json::Value;
use url::form_urlencoded;

/// Flatten a JSON value into ordered form fields.
///
/// Objects and arrays nest with brackets, `null` is dropped, strings are
/// emitted verbatim and other scalars as their JSON text. A scalar at the
/// top level has no key to attach to and yields nothing.
pub fn flatten(value: &Value) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    if let Value::Object(map) = value {
        for (key, value) in map {
            push_field(&mut fields, key.clone(), value);
        }
    }
    fields
}

fn push_field(fields: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::String(s) => fields.push((key, s.clone())),
        Value::Bool(_) | Value::Number(_) => fields.push((key, value.to_string())),
        Value::Object(map) => {
            for (child, value) in map {
                push_field(fields, format!("{key}[{child}]"), value);
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                push_field(fields, format!("{key}[{index}]"), value);
            }
        }
    }
}

/// Serialize fields as `application/x-www-form-urlencoded`.
pub fn encode(fields: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish()
}
