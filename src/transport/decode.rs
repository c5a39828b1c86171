//! Interprets raw response bodies as JSON objects or plain text.

use serde_json::{Map, Value};

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// The body was a JSON object.
    Object(Map<String, Value>),
    /// The body was a JSON array.
    Array(Vec<Value>),
    /// Anything else, trimmed.
    Text(String),
}

/// Tries JSON first and falls back to the trimmed text.
///
/// JSON scalars are treated as text, so a bare numeric file id such as
/// `12345` stays a string.
pub fn decode(body: &str) -> Decoded {
    let trimmed = body.trim();
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => Decoded::Object(map),
        Ok(Value::Array(items)) => Decoded::Array(items),
        _ => Decoded::Text(trimmed.to_string()),
    }
}

/// Shortens a body for log output.
pub(crate) fn truncate_for_log(body: &str) -> String {
    const MAX: usize = 256;
    if body.chars().count() <= MAX {
        return body.to_string();
    }
    let head: String = body.chars().take(MAX).collect();
    format!("{head}... ({} bytes)", body.len())
}
