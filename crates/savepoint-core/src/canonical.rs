//! Canonical JSON encoding for deterministic serialization.
//!
//! The canonical form is ordinary JSON text with two extra guarantees:
//! - Object keys are sorted lexicographically at every nesting level
//! - Minimal separators, no whitespace
//!
//! The canonical encoding is critical: it ensures that the same document
//! content produces identical bytes (and thus an identical checksum) no
//! matter what key order a file or in-memory map happened to use.

use serde_json::Value;

use crate::error::CoreError;

/// Encode a JSON value to canonical bytes.
pub fn canonical_json_bytes(value: &Value) -> Result<Vec<u8>, CoreError> {
    let mut buf = Vec::new();
    write_canonical(&mut buf, value)?;
    Ok(buf)
}

/// Encode a document to the canonical bytes the checksum is computed over.
///
/// `integrity.checksum` is forced to the empty string before encoding, so
/// the digest never covers itself. The input is not modified.
pub fn canonical_document_bytes(value: &Value) -> Result<Vec<u8>, CoreError> {
    let mut scrubbed = value.clone();
    if let Some(integrity) = scrubbed
        .get_mut("integrity")
        .and_then(Value::as_object_mut)
    {
        if integrity.contains_key("checksum") {
            integrity.insert("checksum".to_owned(), Value::String(String::new()));
        }
    }
    canonical_json_bytes(&scrubbed)
}

/// Recursively encode a value. Scalars delegate to serde_json so escaping
/// and number formatting stay consistent with ordinary JSON output.
fn write_canonical(buf: &mut Vec<u8>, value: &Value) -> Result<(), CoreError> {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            let rendered = serde_json::to_string(value)?;
            buf.extend_from_slice(rendered.as_bytes());
        }
        Value::Array(items) => {
            buf.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                write_canonical(buf, item)?;
            }
            buf.push(b']');
        }
        Value::Object(map) => {
            // Sort entries by key, then emit. Mirrors canonical map encoding
            // regardless of the map's own iteration order.
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            buf.push(b'{');
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                let rendered = serde_json::to_string(key.as_str())?;
                buf.extend_from_slice(rendered.as_bytes());
                buf.push(b':');
                write_canonical(buf, item)?;
            }
            buf.push(b'}');
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn canonical_str(value: &Value) -> String {
        String::from_utf8(canonical_json_bytes(value).unwrap()).unwrap()
    }

    #[test]
    fn test_keys_sorted_at_every_level() {
        let value = json!({
            "b": {"z": 1, "a": 2},
            "a": [{"y": true, "x": false}]
        });
        assert_eq!(
            canonical_str(&value),
            r#"{"a":[{"x":false,"y":true}],"b":{"a":2,"z":1}}"#
        );
    }

    #[test]
    fn test_minimal_separators() {
        let value = json!({"k": [1, 2, 3], "s": "v"});
        assert_eq!(canonical_str(&value), r#"{"k":[1,2,3],"s":"v"}"#);
    }

    #[test]
    fn test_scalars() {
        assert_eq!(canonical_str(&json!(null)), "null");
        assert_eq!(canonical_str(&json!(true)), "true");
        assert_eq!(canonical_str(&json!(42)), "42");
        assert_eq!(canonical_str(&json!("hi")), "\"hi\"");
    }

    #[test]
    fn test_non_ascii_not_escaped() {
        assert_eq!(canonical_str(&json!({"msg": "héllo"})), r#"{"msg":"héllo"}"#);
    }

    #[test]
    fn test_checksum_scrubbed_in_document_bytes() {
        let sealed = json!({"integrity": {"algorithm": "sha256", "checksum": "ff"}, "v": 1});
        let unsealed = json!({"integrity": {"algorithm": "sha256", "checksum": ""}, "v": 1});
        assert_eq!(
            canonical_document_bytes(&sealed).unwrap(),
            canonical_document_bytes(&unsealed).unwrap()
        );
        // Scrubbing never touches the input.
        assert_eq!(sealed["integrity"]["checksum"], "ff");
    }

    #[test]
    fn test_missing_integrity_left_alone() {
        let value = json!({"v": 1});
        assert_eq!(
            canonical_document_bytes(&value).unwrap(),
            canonical_json_bytes(&value).unwrap()
        );
    }

    #[test]
    fn test_encoding_deterministic() {
        let value = json!({"m": {"c": 1, "b": [2, {"z": null}]}});
        assert_eq!(
            canonical_json_bytes(&value).unwrap(),
            canonical_json_bytes(&value).unwrap()
        );
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            "[a-zA-Z0-9 _äöü-]{0,12}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z_]{1,8}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn canonical_bytes_are_valid_json(value in arb_value()) {
            let bytes = canonical_json_bytes(&value).unwrap();
            let parsed: Value = serde_json::from_slice(&bytes).unwrap();
            prop_assert_eq!(parsed, value);
        }

        #[test]
        fn canonical_bytes_survive_roundtrip(value in arb_value()) {
            let first = canonical_json_bytes(&value).unwrap();
            let reparsed: Value = serde_json::from_slice(&first).unwrap();
            let second = canonical_json_bytes(&reparsed).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
