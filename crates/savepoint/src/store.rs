//! Document file persistence.
//!
//! Savepoint files are UTF-8 JSON with sorted keys and 2-space indentation
//! for human readability. Loading distinguishes two failure modes: a file
//! that is not JSON at all is fatal (`MalformedInput`), while a JSON file
//! that merely fails the schema is a matter for the validator.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use savepoint_core::{CoreError, Savepoint};

use crate::error::Result;

/// Load a savepoint file as a raw JSON value.
///
/// The raw form is what validation runs against, so shape problems are
/// reported as violations instead of deserialization failures.
pub fn load_document(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)
        .map_err(|e| CoreError::Malformed(format!("{}: {e}", path.display())))?;
    debug!(path = %path.display(), "loaded document");
    Ok(value)
}

/// Convert a raw document value into the typed model.
pub fn savepoint_from_value(value: Value) -> Result<Savepoint> {
    let doc = serde_json::from_value(value).map_err(|e| CoreError::Malformed(e.to_string()))?;
    Ok(doc)
}

/// Load and type a savepoint file in one step.
pub fn load_savepoint(path: &Path) -> Result<Savepoint> {
    savepoint_from_value(load_document(path)?)
}

/// Render a document as the on-disk text form: sorted keys, 2-space
/// indentation, trailing newline.
pub fn render_pretty(doc: &Savepoint) -> Result<String> {
    let value = serde_json::to_value(doc).map_err(CoreError::from)?;
    let mut text = serde_json::to_string_pretty(&value).map_err(CoreError::from)?;
    text.push('\n');
    Ok(text)
}

/// Persist a document, creating parent directories as needed.
pub fn save_savepoint(path: &Path, doc: &Savepoint) -> Result<()> {
    let text = render_pretty(doc)?;
    write_text(path, &text)?;
    debug!(path = %path.display(), "saved document");
    Ok(())
}

/// Write a text artifact, creating parent directories as needed.
pub fn write_text(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, data)?;
    Ok(())
}
