//! File-level orchestration: validate-then-transform flows over savepoint
//! files.
//!
//! Both flows validate before writing anything: an invalid document aborts
//! with no output. Export's checksum refresh on the source file and the
//! artifact write are two separate steps; a crash between them leaves the
//! source sealed without a corresponding artifact.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use savepoint_core::{compute_checksum, validate, Schema};
use savepoint_export::{
    branch_savepoint, export_messages, export_rehydration_prompt, ExportError, FeedFormat,
    PromptOptions,
};

use crate::error::{Result, SavepointError};
use crate::store::{load_document, save_savepoint, savepoint_from_value, write_text};

/// What an export produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    /// A single rehydration prompt.
    Prompt,
    /// A message feed.
    Messages,
}

impl ExportTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prompt => "prompt",
            Self::Messages => "messages",
        }
    }
}

impl fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportTarget {
    type Err = ExportError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prompt" => Ok(Self::Prompt),
            "messages" => Ok(Self::Messages),
            other => Err(ExportError::UnsupportedTarget(other.to_owned())),
        }
    }
}

/// Options for [`export_to_file`].
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub target: ExportTarget,
    /// Format name: `md`/`text` for prompts, `jsonl`/`md`/`text` for feeds.
    pub format: String,
    pub limit: Option<usize>,
    /// Abort before writing anything when the document fails validation.
    pub validate_first: bool,
    /// Recompute and persist the source document's checksum before writing
    /// the artifact.
    pub update_checksum: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            target: ExportTarget::Prompt,
            format: String::from("md"),
            limit: Some(20),
            validate_first: true,
            update_checksum: true,
        }
    }
}

/// Export a prompt or message feed from a savepoint file.
///
/// Flow: load, validate (abort with nothing written when invalid), check
/// the format, optionally re-seal and persist the source, render, write
/// the artifact.
pub fn export_to_file(
    schema: &Schema,
    savepoint_path: &Path,
    out_path: &Path,
    options: &ExportOptions,
) -> Result<()> {
    let value = load_document(savepoint_path)?;

    if options.validate_first {
        let violations = validate(schema, &value);
        if !violations.is_empty() {
            return Err(SavepointError::SchemaViolations(violations));
        }
    }

    // Reject a bad format before any write, including the checksum refresh.
    check_format(options.target, &options.format)?;

    let mut doc = savepoint_from_value(value)?;
    if options.update_checksum {
        compute_checksum(&mut doc)?;
        save_savepoint(savepoint_path, &doc)?;
    }

    let artifact = match options.target {
        ExportTarget::Prompt => export_rehydration_prompt(
            &doc,
            &PromptOptions {
                limit: options.limit,
                ..PromptOptions::default()
            },
        ),
        ExportTarget::Messages => {
            let fmt = FeedFormat::from_str(&options.format)?;
            export_messages(&doc, options.limit, fmt)?
        }
    };
    write_text(out_path, &artifact)?;
    info!(
        source = %savepoint_path.display(),
        out = %out_path.display(),
        target = %options.target,
        "exported artifact"
    );
    Ok(())
}

/// Fork a savepoint file into a new branched file.
///
/// Flow: load, validate (abort with nothing written when invalid), branch,
/// seal the branch, persist only the new file. The source file is never
/// touched.
pub fn branch_to_file(
    schema: &Schema,
    savepoint_path: &Path,
    out_path: &Path,
    branch_name: Option<&str>,
) -> Result<()> {
    let value = load_document(savepoint_path)?;

    let violations = validate(schema, &value);
    if !violations.is_empty() {
        return Err(SavepointError::SchemaViolations(violations));
    }

    let doc = savepoint_from_value(value)?;
    let mut branched = branch_savepoint(&doc, branch_name, true);
    compute_checksum(&mut branched)?;
    save_savepoint(out_path, &branched)?;
    info!(
        source = %savepoint_path.display(),
        out = %out_path.display(),
        branch = branched.session_metadata.branch.as_deref().unwrap_or(""),
        "branched savepoint"
    );
    Ok(())
}

/// Recompute a file's checksum and persist it. Returns the digest.
pub fn checksum_file(path: &Path) -> Result<String> {
    let mut doc = savepoint_from_value(load_document(path)?)?;
    let digest = compute_checksum(&mut doc)?;
    save_savepoint(path, &doc)?;
    Ok(digest)
}

/// Validate a file against the schema. Returns the sorted violation list.
pub fn validate_file(schema: &Schema, path: &Path) -> Result<Vec<String>> {
    let value = load_document(path)?;
    Ok(validate(schema, &value))
}

fn check_format(target: ExportTarget, format: &str) -> Result<()> {
    match target {
        // Prompt export produces one text artifact either way; the knob
        // exists for symmetry with feeds.
        ExportTarget::Prompt => match format.to_ascii_lowercase().as_str() {
            "md" | "text" => Ok(()),
            other => Err(ExportError::UnsupportedFormat(other.to_owned()).into()),
        },
        ExportTarget::Messages => {
            FeedFormat::from_str(format)?;
            Ok(())
        }
    }
}
