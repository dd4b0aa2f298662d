//! Structural validation of documents against a [`Schema`].
//!
//! Validation is a pure read: it never mutates its input and never fails
//! for a malformed-but-parseable document. Nonconformance comes back as a
//! sorted list of human-readable violation messages; an empty list means
//! the document is valid.

use serde_json::Value;

use crate::document::Savepoint;
use crate::error::CoreError;
use crate::schema::{Schema, SchemaNode};

/// Validate a parsed document against the schema.
///
/// Returns violations sorted lexicographically so output is deterministic
/// regardless of traversal order.
pub fn validate(schema: &Schema, doc: &Value) -> Vec<String> {
    let mut violations = Vec::new();
    check_node(schema.root(), doc, "$", &mut violations);
    violations.sort();
    violations
}

/// Validate a typed document. The conversion to a raw value cannot inject
/// violations of its own; it only reuses the single validation path.
pub fn validate_savepoint(schema: &Schema, doc: &Savepoint) -> Result<Vec<String>, CoreError> {
    let value = serde_json::to_value(doc)?;
    Ok(validate(schema, &value))
}

fn check_node(node: &SchemaNode, value: &Value, path: &str, out: &mut Vec<String>) {
    if let Some(kind) = node.kind {
        if !kind.matches(value) {
            out.push(format!(
                "{path}: expected {}, found {}",
                kind.name(),
                value_type_name(value)
            ));
            // A value of the wrong class cannot satisfy nested constraints;
            // reporting them too would just be noise.
            return;
        }
    }

    if let Some(map) = value.as_object() {
        for name in &node.required {
            if !map.contains_key(name) {
                out.push(format!("{path}: missing required property '{name}'"));
            }
        }
        for (name, child) in &node.properties {
            if let Some(child_value) = map.get(name) {
                check_node(child, child_value, &format!("{path}.{name}"), out);
            }
        }
    }

    if let (Some(items), Some(array)) = (&node.items, value.as_array()) {
        for (index, item) in array.iter().enumerate() {
            check_node(items, item, &format!("{path}[{index}]"), out);
        }
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentBlock;
    use serde_json::json;

    #[test]
    fn test_new_document_is_valid() {
        let schema = Schema::savepoint();
        let mut doc = Savepoint::new("App", "1.0", "engine-x");
        doc.append_message("user", vec![ContentBlock::text("hi")]);
        doc.add_attachment("file:///a.txt");
        assert_eq!(validate_savepoint(&schema, &doc).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_missing_top_level_field() {
        let schema = Schema::savepoint();
        let mut value = serde_json::to_value(Savepoint::new("App", "1.0", "e")).unwrap();
        value.as_object_mut().unwrap().remove("integrity");
        let violations = validate(&schema, &value);
        assert_eq!(
            violations,
            vec!["$: missing required property 'integrity'"]
        );
    }

    #[test]
    fn test_wrong_type_reported_not_thrown() {
        let schema = Schema::savepoint();
        let mut value = serde_json::to_value(Savepoint::new("App", "1.0", "e")).unwrap();
        value["schema_version"] = json!(2);
        value["conversation_state"] = json!("not an array");
        let violations = validate(&schema, &value);
        assert_eq!(
            violations,
            vec![
                "$.conversation_state: expected array, found string",
                "$.schema_version: expected string, found number",
            ]
        );
    }

    #[test]
    fn test_nested_violation_paths() {
        let schema = Schema::savepoint();
        let mut value = serde_json::to_value(Savepoint::new("App", "1.0", "e")).unwrap();
        value["session_metadata"]["app"]
            .as_object_mut()
            .unwrap()
            .remove("version");
        value["integrity"]["checksum"] = json!(null);
        let violations = validate(&schema, &value);
        assert_eq!(
            violations,
            vec![
                "$.integrity.checksum: expected string, found null",
                "$.session_metadata.app: missing required property 'version'",
            ]
        );
    }

    #[test]
    fn test_array_item_violations_indexed() {
        let schema = Schema::savepoint();
        let mut value = serde_json::to_value(Savepoint::new("App", "1.0", "e")).unwrap();
        value["attachments"] = json!([{"id": "a1"}, {"id": 2, "uri": "u"}]);
        let violations = validate(&schema, &value);
        assert_eq!(
            violations,
            vec![
                "$.attachments[0]: missing required property 'uri'",
                "$.attachments[1].id: expected string, found number",
            ]
        );
    }

    #[test]
    fn test_violations_sorted() {
        let schema = Schema::savepoint();
        let value = json!({});
        let violations = validate(&schema, &value);
        let mut sorted = violations.clone();
        sorted.sort();
        assert_eq!(violations, sorted);
        assert_eq!(violations.len(), 7);
    }

    #[test]
    fn test_validate_does_not_mutate() {
        let schema = Schema::savepoint();
        let value = json!({"schema_version": 1});
        let before = value.clone();
        let _ = validate(&schema, &value);
        assert_eq!(value, before);
    }
}
