//! Canonical JSON serialization
//!
//! Deterministic string form of arbitrary nested JSON data, independent of
//! object key insertion order. Used as the basis for cart-line identity and
//! draft field diffing: two structurally equal values always canonicalize to
//! the same string.

use serde::Serialize;
use serde_json::Value;

/// Render a JSON value to its canonical string form.
///
/// Object keys are sorted recursively; arrays keep their order; `null`
/// renders as `null`. Strings are JSON-escaped so that structural characters
/// inside them cannot collide with delimiters.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

/// Canonicalize any serializable value.
///
/// Falls back to `null` if the value does not convert to JSON (should not
/// happen for plain data types).
pub fn canonical_string<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(v) => canonical_json(&v),
        Err(e) => {
            tracing::warn!("canonical_string: value not representable as JSON: {}", e);
            "null".to_string()
        }
    }
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => {
            // serde_json escaping keeps the form unambiguous
            out.push_str(&serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string()));
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&serde_json::to_string(key).unwrap_or_else(|_| "\"\"".to_string()));
                out.push(':');
                write_canonical(&map[key.as_str()], out);
            }
            out.push('}');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_order_independent() {
        let a = json!({"b": 1, "a": {"y": 2, "x": 3}});
        let b = json!({"a": {"x": 3, "y": 2}, "b": 1});
        assert_eq!(canonical_json(&a), canonical_json(&b));
    }

    #[test]
    fn test_array_order_sensitive() {
        let a = json!([1, 2]);
        let b = json!([2, 1]);
        assert_ne!(canonical_json(&a), canonical_json(&b));
    }

    #[test]
    fn test_primitives() {
        assert_eq!(canonical_json(&Value::Null), "null");
        assert_eq!(canonical_json(&json!(true)), "true");
        assert_eq!(canonical_json(&json!(1.5)), "1.5");
        assert_eq!(canonical_json(&json!("a\"b")), "\"a\\\"b\"");
    }

    #[test]
    fn test_nested_deterministic() {
        let v = json!({"k": [{"b": null, "a": "x"}, 2]});
        assert_eq!(canonical_json(&v), r#"{"k":[{"a":"x","b":null},2]}"#);
    }

    #[test]
    fn test_canonical_string_matches_value_form() {
        #[derive(serde::Serialize)]
        struct S {
            b: i32,
            a: &'static str,
        }
        let s = S { b: 1, a: "x" };
        assert_eq!(canonical_string(&s), r#"{"a":"x","b":1}"#);
    }
}
