//! # Savepoint
//!
//! Portable save points for AI conversation sessions: a JSON document
//! capturing identity, message history, attachments, and a tamper-evidence
//! checksum, plus deterministic transforms over it.
//!
//! ## Key Concepts
//!
//! - **Savepoint**: The root session document. Mutations reset its checksum.
//! - **Checksum**: SHA-256 over canonical JSON with the checksum field
//!   emptied; identical content always hashes identically.
//! - **Validation**: Structural schema conformance, reported as a sorted
//!   violation list rather than an error.
//! - **Exports**: Rehydration prompts and message feeds for model ingestion.
//! - **Branch**: An independent fork with a branch label and reset
//!   integrity state.
//!
//! ## Usage
//!
//! ```rust
//! use savepoint::{compute_checksum, Savepoint};
//!
//! let mut doc = Savepoint::new("MyApp", "0.1.0", "engine-x");
//! doc.append_message("user", "Hello");
//! let digest = compute_checksum(&mut doc).unwrap();
//! assert_eq!(digest.len(), 64);
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `savepoint::core` - Document model, canonicalization, validation
//! - `savepoint::export` - Prompt/feed transforms and branching

pub mod error;
pub mod session;
pub mod store;

// Re-export component crates
pub use savepoint_core as core;
pub use savepoint_export as export;

// Re-export main types for convenience
pub use error::{Result, SavepointError};
pub use session::{
    branch_to_file, checksum_file, export_to_file, validate_file, ExportOptions, ExportTarget,
};
pub use store::{load_document, load_savepoint, render_pretty, save_savepoint, savepoint_from_value};

// Re-export commonly used core and export types
pub use savepoint_core::{
    checksum_of, compute_checksum, validate, validate_savepoint, verify_checksum, Attachment,
    AttachmentId, ChecksumState, ContentBlock, CoreError, Digest, Message, MessageContent,
    MessageId, Savepoint, Schema, SessionId,
};
pub use savepoint_export::{
    branch_savepoint, export_messages, export_rehydration_prompt, ExportError, FeedFormat,
    NormalizedMessage, PromptOptions,
};
