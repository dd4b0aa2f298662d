//! # Savepoint Export
//!
//! Deterministic transforms over [`savepoint_core::Savepoint`] documents:
//!
//! - **Normalization**: collapse typed content blocks into plain text
//! - **Rehydration prompt**: a compact, model-friendly context summary
//! - **Message feeds**: jsonl / markdown / plain-text history exports
//! - **Branching**: fork a document into an independent variant
//!
//! No model calls and no file I/O happen here; everything is pure
//! transformation over in-memory documents.

pub mod branch;
pub mod error;
pub mod feed;
pub mod normalize;
pub mod prompt;

pub use branch::{branch_savepoint, BRANCH_PREFIX};
pub use error::ExportError;
pub use feed::{export_messages, FeedFormat};
pub use normalize::{coalesce_text, keep_recent, normalized_messages, NormalizedMessage};
pub use prompt::{export_rehydration_prompt, PromptOptions, PROMPT_TAG};
