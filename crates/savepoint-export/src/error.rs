//! Error types for export transforms.

use thiserror::Error;

/// Errors that can occur while exporting a document.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The requested output format is not recognized. Raised before any
    /// output is produced.
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// The requested export target is not recognized.
    #[error("unsupported export target: {0}")]
    UnsupportedTarget(String),

    /// A normalized record could not be encoded.
    #[error("message encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}
