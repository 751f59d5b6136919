//! Recursive string sanitization applied to every value before persistence.
//!
//! Strips NUL bytes and Unicode replacement characters, trims surrounding
//! whitespace, and recurses through nested objects and arrays. Non-string
//! primitives pass through untouched. Idempotent.

use serde_json::Value;

pub fn sanitize_str(text: &str) -> String {
    text.chars()
        .filter(|&c| c != '\0' && c != '\u{FFFD}')
        .collect::<String>()
        .trim()
        .to_string()
}

pub fn sanitize_value(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(sanitize_str(&s)),
        Value::Array(items) => Value::Array(items.into_iter().map(sanitize_value).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, sanitize_value(v)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strips_nul_and_replacement_chars() {
        assert_eq!(sanitize_str("  Ada\0 Love\u{FFFD}lace  "), "Ada Lovelace");
    }

    #[test]
    fn test_recurses_through_nested_shapes() {
        let dirty = json!({
            "name": " Ada\0 ",
            "scores": [{"comment": "\u{FFFD}solid "}, 42, null],
            "nested": {"deep": ["  x  "]}
        });
        let clean = sanitize_value(dirty);
        assert_eq!(
            clean,
            json!({
                "name": "Ada",
                "scores": [{"comment": "solid"}, 42, null],
                "nested": {"deep": ["x"]}
            })
        );
    }

    #[test]
    fn test_non_string_primitives_untouched() {
        let value = json!({"a": 1.5, "b": true, "c": null});
        assert_eq!(sanitize_value(value.clone()), value);
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let dirty = json!({
            "name": " Ada\0 Lovelace ",
            "items": ["  a\u{FFFD}b  ", {"k": " v \0"}]
        });
        let once = sanitize_value(dirty);
        let twice = sanitize_value(once.clone());
        assert_eq!(once, twice);
    }
}
