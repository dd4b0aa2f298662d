//! The Savepoint document model.
//!
//! A savepoint captures an AI conversation session: identity, ordered
//! message history, attached resources, free-form memory, and an integrity
//! record. Mutations happen in place; any append resets the checksum so a
//! stale digest can never describe new content.
//!
//! Unknown keys at the document, message, and attachment level are captured
//! into flatten maps so that load, branch, and checksum all operate on the
//! full logical content of a file, not just the fields this crate models.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::content::MessageContent;
use crate::types::{AttachmentId, MessageId, SessionId};

/// The protocol version written by [`Savepoint::new`].
pub const PROTOCOL_VERSION: &str = "1.0.0";

/// The schema version written by [`Savepoint::new`].
pub const SCHEMA_VERSION: &str = "1.0.0";

/// The checksum algorithm identifier written into new documents.
pub const CHECKSUM_ALGORITHM: &str = "sha256";

/// Current UTC time in ISO 8601 Zulu format with millisecond precision.
pub fn now_utc_millis() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Application identity recorded in session metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
}

/// Engine identity recorded in session metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Session identity: who produced this document, and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    pub id: SessionId,
    pub created_at: String,
    pub app: AppInfo,
    pub engine: EngineInfo,
    /// Branch label, set when this document was forked from another.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Last modification timestamp, refreshed by branching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One conversation message. Insertion order is chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: String,
    pub content: MessageContent,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Free-form memory carried alongside the conversation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemoryState {
    #[serde(default)]
    pub kv: Map<String, Value>,
    #[serde(default)]
    pub notes: Vec<String>,
}

/// An attached resource reference. The hash, if any, is supplied by the
/// caller; the core never fetches or hashes attachment content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: AttachmentId,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The tamper-evidence record. `checksum` is either empty or a lowercase
/// hex SHA-256 digest over the document with this field emptied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Integrity {
    pub algorithm: String,
    pub checksum: String,
}

/// The root session document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Savepoint {
    pub schema_version: String,
    pub protocol_version: String,
    pub session_metadata: SessionMetadata,
    pub conversation_state: Vec<Message>,
    #[serde(default)]
    pub memory_state: MemoryState,
    pub attachments: Vec<Attachment>,
    pub integrity: Integrity,
    #[serde(default)]
    pub provenance: Map<String, Value>,
    #[serde(default)]
    pub protocol_metadata: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Savepoint {
    /// Create a new empty, schema-shaped document with default engine type
    /// and protocol/schema versions. Use [`Savepoint::builder`] to override
    /// those.
    pub fn new(app_name: &str, app_version: &str, engine_name: &str) -> Self {
        Self::builder(app_name, app_version, engine_name).build()
    }

    /// Start building a document with non-default identity fields.
    pub fn builder(app_name: &str, app_version: &str, engine_name: &str) -> SavepointBuilder {
        SavepointBuilder {
            app_name: app_name.to_owned(),
            app_version: app_version.to_owned(),
            engine_name: engine_name.to_owned(),
            engine_type: String::from("llm"),
            protocol_version: PROTOCOL_VERSION.to_owned(),
            schema_version: SCHEMA_VERSION.to_owned(),
        }
    }

    /// Append a message with the current UTC timestamp and no metadata.
    ///
    /// Returns the new message id. Resets the integrity checksum.
    pub fn append_message(&mut self, role: &str, content: impl Into<MessageContent>) -> MessageId {
        self.append_message_with(role, content, None, None)
    }

    /// Append a message with an explicit timestamp and/or metadata.
    ///
    /// The mutation is applied in place and is not transactional: if a
    /// downstream write fails, the in-memory document keeps the message.
    pub fn append_message_with(
        &mut self,
        role: &str,
        content: impl Into<MessageContent>,
        created_at: Option<String>,
        metadata: Option<Map<String, Value>>,
    ) -> MessageId {
        let id = MessageId::generate();
        self.conversation_state.push(Message {
            id: id.clone(),
            role: role.to_owned(),
            content: content.into(),
            created_at: created_at.unwrap_or_else(now_utc_millis),
            metadata,
            extra: Map::new(),
        });
        self.reset_checksum();
        id
    }

    /// Append an attachment reference with only a URI.
    ///
    /// Returns the new attachment id. Resets the integrity checksum.
    pub fn add_attachment(&mut self, uri: &str) -> AttachmentId {
        self.add_attachment_with(uri, None, None, None)
    }

    /// Append an attachment reference with optional mime type, description,
    /// and caller-supplied content hash.
    pub fn add_attachment_with(
        &mut self,
        uri: &str,
        mime: Option<&str>,
        description: Option<&str>,
        hash: Option<&str>,
    ) -> AttachmentId {
        let id = AttachmentId::generate();
        self.attachments.push(Attachment {
            id: id.clone(),
            uri: uri.to_owned(),
            mime: mime.map(str::to_owned),
            description: description.map(str::to_owned),
            hash: hash.map(str::to_owned),
            extra: Map::new(),
        });
        self.reset_checksum();
        id
    }

    /// Clear the stored checksum. Called by every content mutation so the
    /// checksum can never be stale and non-empty at the same time.
    pub fn reset_checksum(&mut self) {
        self.integrity.checksum.clear();
    }

    /// Whether a checksum has been computed since the last mutation.
    pub fn is_sealed(&self) -> bool {
        !self.integrity.checksum.is_empty()
    }
}

/// Builder for [`Savepoint`] documents with non-default versions.
pub struct SavepointBuilder {
    app_name: String,
    app_version: String,
    engine_name: String,
    engine_type: String,
    protocol_version: String,
    schema_version: String,
}

impl SavepointBuilder {
    /// Set the engine type (default `"llm"`).
    pub fn engine_type(mut self, kind: &str) -> Self {
        self.engine_type = kind.to_owned();
        self
    }

    /// Set the protocol version (default [`PROTOCOL_VERSION`]).
    pub fn protocol_version(mut self, version: &str) -> Self {
        self.protocol_version = version.to_owned();
        self
    }

    /// Set the schema version (default [`SCHEMA_VERSION`]).
    pub fn schema_version(mut self, version: &str) -> Self {
        self.schema_version = version.to_owned();
        self
    }

    /// Build the empty document: fresh session id, current creation
    /// timestamp, no messages, no attachments, empty checksum.
    pub fn build(self) -> Savepoint {
        Savepoint {
            schema_version: self.schema_version,
            protocol_version: self.protocol_version,
            session_metadata: SessionMetadata {
                id: SessionId::generate(),
                created_at: now_utc_millis(),
                app: AppInfo {
                    name: self.app_name,
                    version: self.app_version,
                },
                engine: EngineInfo {
                    name: self.engine_name,
                    kind: self.engine_type,
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
                algorithm: CHECKSUM_ALGORITHM.to_owned(),
                checksum: String::new(),
            },
            provenance: Map::new(),
            protocol_metadata: Map::new(),
            extra: Map::new(),
        }
    }
}
