//! The structural schema the validator checks documents against.
//!
//! The schema is an explicit configuration object: built once at process
//! start (either the built-in canonical definition or one loaded from a
//! schema file) and passed into validation by reference. There is no hidden
//! process-wide schema state.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::CoreError;

/// The JSON type classes the validator can check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    String,
    Object,
    Array,
    Number,
    Integer,
    Boolean,
    Null,
}

impl TypeKind {
    /// Parse a JSON-Schema style type name.
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        match name {
            "string" => Ok(Self::String),
            "object" => Ok(Self::Object),
            "array" => Ok(Self::Array),
            "number" => Ok(Self::Number),
            "integer" => Ok(Self::Integer),
            "boolean" => Ok(Self::Boolean),
            "null" => Ok(Self::Null),
            other => Err(CoreError::InvalidSchema(format!("unknown type '{other}'"))),
        }
    }

    /// The type name used in violation messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Object => "object",
            Self::Array => "array",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }

    /// Whether a value belongs to this type class.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::Null => value.is_null(),
        }
    }
}

/// One node of the schema tree: an optional type constraint plus nested
/// required/property/item constraints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaNode {
    pub kind: Option<TypeKind>,
    pub required: Vec<String>,
    pub properties: BTreeMap<String, SchemaNode>,
    pub items: Option<Box<SchemaNode>>,
}

impl SchemaNode {
    fn typed(kind: TypeKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    fn object(required: &[&str], properties: Vec<(&str, SchemaNode)>) -> Self {
        Self {
            kind: Some(TypeKind::Object),
            required: required.iter().map(|s| (*s).to_owned()).collect(),
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v))
                .collect(),
            items: None,
        }
    }

    fn array_of(items: SchemaNode) -> Self {
        Self {
            kind: Some(TypeKind::Array),
            items: Some(Box::new(items)),
            ..Self::default()
        }
    }
}

/// A complete document schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    root: SchemaNode,
}

impl Schema {
    /// The root node.
    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    /// The built-in canonical savepoint schema.
    pub fn savepoint() -> Self {
        let string = || SchemaNode::typed(TypeKind::String);

        let session_metadata = SchemaNode::object(
            &["id", "created_at", "app", "engine"],
            vec![
                ("id", string()),
                ("created_at", string()),
                (
                    "app",
                    SchemaNode::object(
                        &["name", "version"],
                        vec![("name", string()), ("version", string())],
                    ),
                ),
                (
                    "engine",
                    SchemaNode::object(
                        &["name", "type"],
                        vec![("name", string()), ("type", string())],
                    ),
                ),
                ("branch", string()),
                ("updated_at", string()),
                ("tags", SchemaNode::array_of(string())),
            ],
        );

        // `content` carries no type constraint: block list or legacy string.
        let message = SchemaNode::object(
            &["id", "role", "content", "created_at"],
            vec![
                ("id", string()),
                ("role", string()),
                ("created_at", string()),
            ],
        );

        let attachment = SchemaNode::object(
            &["id", "uri"],
            vec![
                ("id", string()),
                ("uri", string()),
                ("mime", string()),
                ("description", string()),
                ("hash", string()),
            ],
        );

        let root = SchemaNode::object(
            &[
                "schema_version",
                "protocol_version",
                "session_metadata",
                "conversation_state",
                "memory_state",
                "attachments",
                "integrity",
            ],
            vec![
                ("schema_version", string()),
                ("protocol_version", string()),
                ("session_metadata", session_metadata),
                ("conversation_state", SchemaNode::array_of(message)),
                (
                    "memory_state",
                    SchemaNode::object(
                        &["kv", "notes"],
                        vec![
                            ("kv", SchemaNode::typed(TypeKind::Object)),
                            ("notes", SchemaNode::array_of(string())),
                        ],
                    ),
                ),
                ("attachments", SchemaNode::array_of(attachment)),
                (
                    "integrity",
                    SchemaNode::object(
                        &["algorithm", "checksum"],
                        vec![("algorithm", string()), ("checksum", string())],
                    ),
                ),
                ("provenance", SchemaNode::typed(TypeKind::Object)),
                ("protocol_metadata", SchemaNode::typed(TypeKind::Object)),
            ],
        );

        Self { root }
    }

    /// Load a schema from a JSON-Schema style definition.
    ///
    /// Supports the structural subset this validator checks: `type`
    /// (single name), `required`, `properties`, and `items`. Other keywords
    /// are ignored.
    pub fn from_value(value: &Value) -> Result<Self, CoreError> {
        Ok(Self {
            root: parse_node(value)?,
        })
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::savepoint()
    }
}

fn parse_node(value: &Value) -> Result<SchemaNode, CoreError> {
    let map = value
        .as_object()
        .ok_or_else(|| CoreError::InvalidSchema("schema node must be an object".into()))?;

    let kind = match map.get("type") {
        None => None,
        Some(Value::String(name)) => Some(TypeKind::parse(name)?),
        Some(_) => {
            return Err(CoreError::InvalidSchema(
                "'type' must be a single type name".into(),
            ))
        }
    };

    let mut required = Vec::new();
    if let Some(value) = map.get("required") {
        let names = value
            .as_array()
            .ok_or_else(|| CoreError::InvalidSchema("'required' must be an array".into()))?;
        for name in names {
            let name = name
                .as_str()
                .ok_or_else(|| CoreError::InvalidSchema("'required' entries must be strings".into()))?;
            required.push(name.to_owned());
        }
    }

    let mut properties = BTreeMap::new();
    if let Some(value) = map.get("properties") {
        let props = value
            .as_object()
            .ok_or_else(|| CoreError::InvalidSchema("'properties' must be an object".into()))?;
        for (name, node) in props {
            properties.insert(name.clone(), parse_node(node)?);
        }
    }

    let items = match map.get("items") {
        None => None,
        Some(node) => Some(Box::new(parse_node(node)?)),
    };

    Ok(SchemaNode {
        kind,
        required,
        properties,
        items,
    })
}
