//! Message content: typed content blocks and the legacy bare-string form.
//!
//! A content block is a closed tagged union over the `{type, data}` wire
//! shape. Text blocks are interpreted; every other type tag is carried as an
//! opaque payload and never inspected by the core.

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// One typed unit of message payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    /// `{"type": "text", "data": <string>}`
    Text(String),
    /// Any other type tag. The payload is preserved verbatim but not
    /// interpreted; a missing `data` key stays missing on re-serialization.
    Other {
        kind: String,
        payload: Option<Value>,
    },
}

impl ContentBlock {
    /// Construct a text block.
    pub fn text(data: impl Into<String>) -> Self {
        Self::Text(data.into())
    }

    /// Construct an opaque non-text block.
    pub fn other(kind: impl Into<String>, payload: Value) -> Self {
        Self::Other {
            kind: kind.into(),
            payload: Some(payload),
        }
    }

    /// The type tag of this block.
    pub fn kind(&self) -> &str {
        match self {
            Self::Text(_) => "text",
            Self::Other { kind, .. } => kind,
        }
    }
}

impl Serialize for ContentBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(data) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "text")?;
                map.serialize_entry("data", data)?;
                map.end()
            }
            Self::Other { kind, payload } => {
                let len = if payload.is_some() { 2 } else { 1 };
                let mut map = serializer.serialize_map(Some(len))?;
                map.serialize_entry("type", kind)?;
                if let Some(p) = payload {
                    map.serialize_entry("data", p)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ContentBlock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut map = Map::deserialize(deserializer)?;
        let kind = match map.get("type") {
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(D::Error::custom("content block `type` must be a string")),
            // Tag-less blocks fall into the opaque default case.
            None => String::from("unknown"),
        };
        let payload = map.remove("data");
        if kind == "text" {
            if let Some(Value::String(text)) = payload {
                return Ok(Self::Text(text));
            }
            // A text tag with a non-string payload is out of model; keep it
            // opaque rather than guessing a string conversion.
            return Ok(Self::Other { kind, payload });
        }
        Ok(Self::Other { kind, payload })
    }
}

/// The `content` field of a message.
///
/// The current format is an ordered sequence of [`ContentBlock`]; older
/// documents stored a bare string, which is accepted and used verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Blocks(Vec<ContentBlock>),
    Legacy(String),
}

impl MessageContent {
    /// A single text block.
    pub fn text(data: impl Into<String>) -> Self {
        Self::Blocks(vec![ContentBlock::text(data)])
    }
}

impl From<Vec<ContentBlock>> for MessageContent {
    fn from(blocks: Vec<ContentBlock>) -> Self {
        Self::Blocks(blocks)
    }
}

impl From<&str> for MessageContent {
    fn from(s: &str) -> Self {
        Self::text(s)
    }
}

impl From<String> for MessageContent {
    fn from(s: String) -> Self {
        Self::text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_block_roundtrip() {
        let block = ContentBlock::text("hi");
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value, json!({"type": "text", "data": "hi"}));
        let back: ContentBlock = serde_json::from_value(value).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_other_block_preserves_payload() {
        let value = json!({"type": "image", "data": {"uri": "file:///cat.png", "w": 64}});
        let block: ContentBlock = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(block.kind(), "image");
        let back = serde_json::to_value(&block).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_other_block_without_data_stays_bare() {
        let value = json!({"type": "tombstone"});
        let block: ContentBlock = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(serde_json::to_value(&block).unwrap(), value);
    }

    #[test]
    fn test_missing_type_tag_is_opaque() {
        let block: ContentBlock = serde_json::from_value(json!({"data": "x"})).unwrap();
        assert_eq!(block.kind(), "unknown");
    }

    #[test]
    fn test_non_string_type_rejected() {
        let result: Result<ContentBlock, _> = serde_json::from_value(json!({"type": 7}));
        assert!(result.is_err());
    }

    #[test]
    fn test_legacy_string_content() {
        let content: MessageContent = serde_json::from_value(json!("plain words")).unwrap();
        assert_eq!(content, MessageContent::Legacy("plain words".into()));
    }

    #[test]
    fn test_block_list_content() {
        let content: MessageContent =
            serde_json::from_value(json!([{"type": "text", "data": "a"}])).unwrap();
        assert!(matches!(content, MessageContent::Blocks(ref b) if b.len() == 1));
    }
}
