use serde_json::Value;

/* EVCC payloads are not validated, a key of the wrong type is treated like a missing one */

pub fn json_to_f64(doc: &Value, key: &str) -> Option<f64> {
    return doc.get(key).and_then(|v| v.as_f64());
}

pub fn json_to_string(doc: &Value, key: &str) -> Option<String> {
    return doc.get(key).and_then(|v| v.as_str()).map(|s| s.to_string());
}

/// Read a flag the way EVCC clients usually do: anything "non-empty" is true.
pub fn json_to_bool(doc: &Value, key: &str) -> Option<bool> {
    match doc.get(key)? {
        Value::Null => None,
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().map(|f| f != 0.0).unwrap_or(true)),
        Value::String(s) => Some(!s.is_empty()),
        Value::Array(a) => Some(!a.is_empty()),
        Value::Object(o) => Some(!o.is_empty()),
    }
}

/// Copy a value without looking at its type, `null` counts as missing
pub fn json_to_value(doc: &Value, key: &str) -> Option<Value> {
    match doc.get(key) {
        None | Some(Value::Null) => None,
        Some(v) => Some(v.clone()),
    }
}

/// Is `value` something worth mapping (a non-empty object)
pub fn is_filled_object(value: &Value) -> bool {
    match value {
        Value::Object(o) => !o.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_to_f64() {
        let doc = json!({"a": 1, "b": 2.5, "c": "3", "d": null});
        assert_eq!(json_to_f64(&doc, "a"), Some(1.0));
        assert_eq!(json_to_f64(&doc, "b"), Some(2.5));
        assert_eq!(json_to_f64(&doc, "c"), None);
        assert_eq!(json_to_f64(&doc, "d"), None);
        assert_eq!(json_to_f64(&doc, "missing"), None);
    }

    #[test]
    fn test_json_to_string() {
        let doc = json!({"title": "Zoe", "n": 5});
        assert_eq!(json_to_string(&doc, "title"), Some("Zoe".to_string()));
        assert_eq!(json_to_string(&doc, "n"), None);
    }

    #[test]
    fn test_json_to_bool() {
        let doc = json!({"t": true, "f": false, "one": 1, "zero": 0, "s": "", "n": null});
        assert_eq!(json_to_bool(&doc, "t"), Some(true));
        assert_eq!(json_to_bool(&doc, "f"), Some(false));
        assert_eq!(json_to_bool(&doc, "one"), Some(true));
        assert_eq!(json_to_bool(&doc, "zero"), Some(false));
        assert_eq!(json_to_bool(&doc, "s"), Some(false));
        assert_eq!(json_to_bool(&doc, "n"), None);
        assert_eq!(json_to_bool(&doc, "missing"), None);
    }

    #[test]
    fn test_is_filled_object() {
        assert!(is_filled_object(&json!({"a": 1})));
        assert!(!is_filled_object(&json!({})));
        assert!(!is_filled_object(&json!("session")));
        assert!(!is_filled_object(&Value::Null));
    }
}
