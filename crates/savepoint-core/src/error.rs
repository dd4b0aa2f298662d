//! Error types for Savepoint Core.

use thiserror::Error;

/// Core errors that can occur during document operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The input is not a well-formed document. Fatal: callers must not
    /// produce partial output after this.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// Serialization or deserialization failed.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A schema definition could not be interpreted.
    #[error("invalid schema definition: {0}")]
    InvalidSchema(String),

    /// A digest string is not valid lowercase hex of the expected length.
    #[error("invalid digest: {0}")]
    InvalidDigest(String),
}
