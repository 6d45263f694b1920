//! Structural value helpers
//!
//! Expectations and captured payloads are compared in their structural form
//! (`serde_json::Value`): primitives, ordered sequences, key-ordered maps,
//! and null. Two nulls compare equal; null against anything present does not.

use serde::Serialize;
use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// Converts any serializable value into its structural representation.
///
/// # Errors
/// Returns [`DomainError::ValueConversion`] when the value cannot be
/// represented structurally (for example a map with non-string keys).
pub fn to_value<T: Serialize>(value: &T) -> DomainResult<Value> {
    serde_json::to_value(value).map_err(|e| DomainError::ValueConversion(e.to_string()))
}

/// Structural deep equality.
#[must_use]
pub fn deep_equal(left: &Value, right: &Value) -> bool {
    left == right
}

/// Renders a value for use inside a failure message.
///
/// Strings are single-quoted the way invocation labels are; everything else
/// renders as compact JSON.
#[must_use]
pub fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{s}'"),
        other => other.to_string(),
    }
}

/// Friendly name of a value's structural kind.
#[must_use]
pub const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "map",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_semantics() {
        assert!(deep_equal(&Value::Null, &Value::Null));
        assert!(!deep_equal(&Value::Null, &json!(0)));
        assert!(!deep_equal(&json!("x"), &Value::Null));
    }

    #[test]
    fn test_deep_equal_nested() {
        let left = json!({"id": 1, "tags": ["a", "b"], "meta": {"ok": true}});
        let right = json!({"meta": {"ok": true}, "tags": ["a", "b"], "id": 1});
        assert!(deep_equal(&left, &right));
        assert!(!deep_equal(&left, &json!({"id": 1, "tags": ["b", "a"]})));
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(&json!("/home")), "'/home'");
        assert_eq!(describe(&json!(42)), "42");
        assert_eq!(describe(&json!({"a": 1})), r#"{"a":1}"#);
    }
}
