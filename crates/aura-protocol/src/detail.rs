//! Turning error bodies into one displayable line.
//!
//! The API reports failures in two shapes: `{"detail": "..."}` for
//! request-level errors, and per-field maps such as
//! `{"email": ["Email already registered."]}` for form validation. Both
//! collapse to a single string here.

use serde_json::Value;

/// Shown when the body carries nothing usable.
pub const FALLBACK_MESSAGE: &str = "Request failed.";

/// Extracts a human-readable message from a non-2xx response body.
///
/// - `detail` wins when present and non-empty.
/// - Otherwise the first other field in document order, as
///   `"<field>: <value>"`.
///   Array values contribute their first element.
/// - A top-level array contributes its first element.
/// - Anything else (non-JSON, empty object, empty body) yields
///   [`FALLBACK_MESSAGE`].
pub fn error_message(body: &[u8], json: bool) -> String {
    if !json {
        return FALLBACK_MESSAGE.to_string();
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => {
            if let Some(detail) = map.get("detail").and_then(text) {
                return detail;
            }
            map.iter()
                .find(|(field, _)| field.as_str() != "detail")
                .map(|(field, value)| match first(value).and_then(text) {
                    Some(msg) => format!("{field}: {msg}"),
                    None => field.clone(),
                })
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
        }
        Ok(Value::Array(items)) => items
            .first()
            .and_then(text)
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
        _ => FALLBACK_MESSAGE.to_string(),
    }
}

fn first(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.first(),
        other => Some(other),
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
