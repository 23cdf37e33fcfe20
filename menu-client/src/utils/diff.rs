//! Field-wise change detection between a draft and its server snapshot
//!
//! Comparison rules:
//! - a pending (not-yet-uploaded) asset value is always a change;
//! - primitive values compare with null and empty string considered equal
//!   (nullable backend columns vs. defaulted form inputs);
//! - structured values compare by canonical serialization, so object key
//!   order never affects the result while array order does.

use serde_json::{Map, Value};
use shared::canonical::canonical_json;
use shared::models::FieldKey;

/// Compute the sorted set of tracked keys whose values differ.
pub fn detect_changes(
    local: &Map<String, Value>,
    server: &Map<String, Value>,
    tracked: &[FieldKey],
) -> Vec<FieldKey> {
    let mut changed: Vec<FieldKey> = tracked
        .iter()
        .copied()
        .filter(|key| {
            let l = local.get(key.as_str()).unwrap_or(&Value::Null);
            let s = server.get(key.as_str()).unwrap_or(&Value::Null);
            values_differ(l, s)
        })
        .collect();
    changed.sort();
    changed.dedup();
    changed
}

fn values_differ(local: &Value, server: &Value) -> bool {
    if is_pending_asset(local) {
        return true;
    }
    match (primitive_form(local), primitive_form(server)) {
        (Some(l), Some(s)) => l != s,
        _ => canonical_json(local) != canonical_json(server),
    }
}

/// String coercion for primitive comparison; `None` for structured values.
fn primitive_form(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn is_pending_asset(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|o| o.get("state"))
        .and_then(Value::as_str)
        == Some("PENDING")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::models::{AssetField, MenuFields};

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_no_changes_on_equal_maps() {
        let local = map(json!({"title": "A", "services": ["DELIVERY"]}));
        let server = local.clone();
        assert!(
            detect_changes(&local, &server, &[FieldKey::Title, FieldKey::Services]).is_empty()
        );
    }

    #[test]
    fn test_primitive_change_detected() {
        let local = map(json!({"title": "B"}));
        let server = map(json!({"title": "A"}));
        assert_eq!(
            detect_changes(&local, &server, &[FieldKey::Title]),
            vec![FieldKey::Title]
        );
    }

    #[test]
    fn test_null_equals_empty_string() {
        let local = map(json!({"description": ""}));
        let server = map(json!({"description": null}));
        assert!(detect_changes(&local, &server, &[FieldKey::Description]).is_empty());
    }

    #[test]
    fn test_key_order_does_not_matter() {
        let local = map(json!({"hours": {"MONDAY": "09:00-18:00", "TUESDAY": null}}));
        let server = map(json!({"hours": {"TUESDAY": null, "MONDAY": "09:00-18:00"}}));
        assert!(detect_changes(&local, &server, &[FieldKey::Hours]).is_empty());
    }

    #[test]
    fn test_array_order_matters() {
        let local = map(json!({"services": ["DELIVERY", "TAKEOUT"]}));
        let server = map(json!({"services": ["TAKEOUT", "DELIVERY"]}));
        assert_eq!(
            detect_changes(&local, &server, &[FieldKey::Services]),
            vec![FieldKey::Services]
        );
    }

    #[test]
    fn test_pending_asset_always_changed() {
        let pending = serde_json::to_value(AssetField::pending("b.png", "/tmp/b.png")).unwrap();
        let local = map(json!({"banner": pending}));
        // even against an identical-looking server value
        let server = local.clone();
        assert_eq!(
            detect_changes(&local, &server, &[FieldKey::Banner]),
            vec![FieldKey::Banner]
        );
    }

    #[test]
    fn test_result_sorted_and_deterministic() {
        let local = map(json!({"title": "B", "slug": "b", "description": "x"}));
        let server = map(json!({"title": "A", "slug": "a", "description": "y"}));
        let tracked = [FieldKey::Title, FieldKey::Description, FieldKey::Slug];
        let first = detect_changes(&local, &server, &tracked);
        assert_eq!(
            first,
            vec![FieldKey::Description, FieldKey::Slug, FieldKey::Title]
        );
        assert_eq!(first, detect_changes(&local, &server, &tracked));
    }

    #[test]
    fn test_full_field_set_empty_iff_equal() {
        let fields = MenuFields::default();
        let local = fields.to_value_map();
        let server = fields.to_value_map();
        assert!(detect_changes(&local, &server, &FieldKey::ALL).is_empty());

        let mut edited = fields.clone();
        edited.title = "New".to_string();
        let local = edited.to_value_map();
        assert_eq!(
            detect_changes(&local, &server, &FieldKey::ALL),
            vec![FieldKey::Title]
        );
    }
}
