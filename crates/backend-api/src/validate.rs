//! Request-body field validation.

use serde_json::{Map, Value};

/// Collect every required field that is absent from `body` or present with a
/// `null` value, preserving the order of `required`. An empty result means
/// the body passed; a non-empty one must fail the whole request.
pub fn missing_fields(required: &[&str], body: &Map<String, Value>) -> Vec<String> {
    required
        .iter()
        .filter(|name| body.get(**name).map_or(true, Value::is_null))
        .map(|name| (*name).to_string())
        .collect()
}

/// Fetch a field as text. String values pass through unchanged; other
/// non-null scalars are stringified, matching the legacy coercion of every
/// value through string conversion before use.
pub fn text_field(body: &Map<String, Value>, name: &str) -> String {
    match body.get(name) {
        Some(Value::String(value)) => value.clone(),
        Some(Value::Null) | None => String::new(),
        Some(value) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: serde_json::Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn collects_all_missing_fields_in_required_order() {
        let body = body(json!({"email": "t@m.com"}));

        let missing = missing_fields(&["name", "email", "phone", "password"], &body);
        assert_eq!(missing, vec!["name", "phone", "password"]);
    }

    #[test]
    fn null_counts_as_missing() {
        let body = body(json!({"name": null, "email": "t@m.com"}));

        let missing = missing_fields(&["name", "email"], &body);
        assert_eq!(missing, vec!["name"]);
    }

    #[test]
    fn complete_body_yields_no_missing_fields() {
        let body = body(json!({"email": "t@m.com", "password": "1234"}));

        assert!(missing_fields(&["email", "password"], &body).is_empty());
    }

    #[test]
    fn text_field_coerces_non_string_scalars() {
        let body = body(json!({"phone": 1234, "name": "t"}));

        assert_eq!(text_field(&body, "phone"), "1234");
        assert_eq!(text_field(&body, "name"), "t");
        assert_eq!(text_field(&body, "absent"), "");
    }
}
