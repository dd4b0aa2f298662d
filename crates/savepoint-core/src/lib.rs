//! # Savepoint Core
//!
//! Pure primitives for Savepoint session documents: the document model,
//! canonical serialization, checksum integrity, and schema validation.
//!
//! This crate contains no file I/O and no networking. It is pure computation
//! over an in-memory document.
//!
//! ## Key Types
//!
//! - [`Savepoint`] - The root session document
//! - [`Message`] / [`ContentBlock`] - Conversation history units
//! - [`Digest`] - SHA-256 digest rendered as lowercase hex
//! - [`Schema`] - Structural schema the validator checks documents against
//!
//! ## Canonicalization
//!
//! Checksums are computed over canonical JSON: lexicographically sorted keys
//! at every nesting level, minimal separators, `integrity.checksum` forced
//! empty. See the [`canonical`] module.

pub mod canonical;
pub mod content;
pub mod document;
pub mod error;
pub mod integrity;
pub mod schema;
pub mod types;
pub mod validation;

pub use canonical::{canonical_document_bytes, canonical_json_bytes};
pub use content::{ContentBlock, MessageContent};
pub use document::{
    now_utc_millis, AppInfo, Attachment, EngineInfo, Integrity, MemoryState, Message, Savepoint,
    SavepointBuilder, SessionMetadata, CHECKSUM_ALGORITHM, PROTOCOL_VERSION, SCHEMA_VERSION,
};
pub use error::CoreError;
pub use integrity::{checksum_of, compute_checksum, verify_checksum, ChecksumState};
pub use schema::{Schema, SchemaNode, TypeKind};
pub use types::{AttachmentId, Digest, MessageId, SessionId};
pub use validation::{validate, validate_savepoint};
