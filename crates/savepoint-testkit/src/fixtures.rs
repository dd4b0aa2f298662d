//! Test fixtures and helpers.
//!
//! Common setup code for integration tests. The documents built here use
//! fixed ids and timestamps so two calls produce identical content.

use serde_json::Map;

use savepoint_core::{
    AppInfo, Attachment, AttachmentId, ContentBlock, EngineInfo, Integrity, MemoryState, Message,
    MessageContent, MessageId, Savepoint, Schema, SessionId, SessionMetadata,
};

/// A test fixture bundling the canonical schema with document builders.
pub struct TestFixture {
    pub schema: Schema,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            schema: Schema::savepoint(),
        }
    }

    /// A deterministic empty document.
    pub fn empty_doc(&self) -> Savepoint {
        deterministic_savepoint()
    }

    /// A deterministic document with a short conversation.
    pub fn chat_doc(&self) -> Savepoint {
        chat_savepoint(&["a", "b", "c"])
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a deterministic, schema-valid empty document.
pub fn deterministic_savepoint() -> Savepoint {
    Savepoint {
        schema_version: "1.0.0".to_owned(),
        protocol_version: "1.0.0".to_owned(),
        session_metadata: SessionMetadata {
            id: SessionId::from_string("00000000-0000-0000-0000-000000000001"),
            created_at: "2026-01-01T00:00:00.000Z".to_owned(),
            app: AppInfo {
                name: "TestApp".to_owned(),
                version: "1.0".to_owned(),
            },
            engine: EngineInfo {
                name: "engine-x".to_owned(),
                kind: "llm".to_owned(),
            },
            branch: None,
            updated_at: None,
            tags: Vec::new(),
            extra: Map::new(),
        },
        conversation_state: Vec::new(),
        memory_state: MemoryState::default(),
        attachments: Vec::new(),
        integrity: Integrity {
            algorithm: "sha256".to_owned(),
            checksum: String::new(),
        },
        provenance: Map::new(),
        protocol_metadata: Map::new(),
        extra: Map::new(),
    }
}

/// Build a deterministic document with one user message per text, roles
/// alternating user/assistant.
pub fn chat_savepoint(texts: &[&str]) -> Savepoint {
    let mut doc = deterministic_savepoint();
    for (i, text) in texts.iter().enumerate() {
        let role = if i % 2 == 0 { "user" } else { "assistant" };
        doc.conversation_state.push(Message {
            id: MessageId::from_string(format!("00000000-0000-0000-0001-{i:012}")),
            role: role.to_owned(),
            content: MessageContent::Blocks(vec![ContentBlock::text(*text)]),
            created_at: format!("2026-01-01T00:00:{:02}.000Z", i + 1),
            metadata: None,
            extra: Map::new(),
        });
    }
    doc
}

/// Add a deterministic attachment to a document.
pub fn with_attachment(mut doc: Savepoint, uri: &str) -> Savepoint {
    doc.attachments.push(Attachment {
        id: AttachmentId::from_string(format!(
            "00000000-0000-0000-0002-{:012}",
            doc.attachments.len()
        )),
        uri: uri.to_owned(),
        mime: None,
        description: None,
        hash: None,
        extra: Map::new(),
    });
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use savepoint_core::validate_savepoint;

    #[test]
    fn test_fixture_docs_are_valid() {
        let fixture = TestFixture::new();
        let doc = with_attachment(fixture.chat_doc(), "file:///a.txt");
        assert!(validate_savepoint(&fixture.schema, &doc)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_fixture_docs_are_deterministic() {
        assert_eq!(deterministic_savepoint(), deterministic_savepoint());
        assert_eq!(chat_savepoint(&["a", "b"]), chat_savepoint(&["a", "b"]));
    }
}
