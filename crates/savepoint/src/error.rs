//! Error types for the Savepoint facade.

use savepoint_core::CoreError;
use savepoint_export::ExportError;
use thiserror::Error;

/// Errors that can occur during file-level savepoint operations.
#[derive(Debug, Error)]
pub enum SavepointError {
    /// Core document error (malformed input, serialization failure).
    #[error("document error: {0}")]
    Core(#[from] CoreError),

    /// Export error (unsupported format or target).
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// The document does not conform to the schema. Fatal for export and
    /// branch: nothing is written.
    #[error("validation failed with {} violation(s)", .0.len())]
    SchemaViolations(Vec<String>),

    /// File I/O failure. Never swallowed or retried.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SavepointError {
    /// The violation list, when this is a validation failure.
    pub fn violations(&self) -> Option<&[String]> {
        match self {
            Self::SchemaViolations(v) => Some(v),
            _ => None,
        }
    }
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, SavepointError>;
