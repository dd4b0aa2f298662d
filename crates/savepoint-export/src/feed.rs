//! Message feed export: history as jsonl, markdown, or plain text.

use std::fmt;
use std::str::FromStr;

use savepoint_core::Savepoint;

use crate::error::ExportError;
use crate::normalize::{keep_recent, normalized_messages};

/// The formats a message feed can be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    /// One `{"role", "content"}` record per line, each independently
    /// parseable.
    Jsonl,
    /// A `### role` heading, a blank line, the content, a blank line.
    Markdown,
    /// `role: content` per line.
    Text,
}

impl FeedFormat {
    /// The format name accepted by [`FeedFormat::from_str`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jsonl => "jsonl",
            Self::Markdown => "md",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jsonl" => Ok(Self::Jsonl),
            "md" => Ok(Self::Markdown),
            "text" => Ok(Self::Text),
            other => Err(ExportError::UnsupportedFormat(other.to_owned())),
        }
    }
}

/// Export normalized messages in the requested format.
///
/// `limit`, when positive, keeps only the most recent N messages in
/// original chronological order. An empty feed renders as the empty string;
/// a non-empty feed ends with a single trailing newline.
pub fn export_messages(
    doc: &Savepoint,
    limit: Option<usize>,
    fmt: FeedFormat,
) -> Result<String, ExportError> {
    let messages = keep_recent(normalized_messages(doc), limit);
    if messages.is_empty() {
        return Ok(String::new());
    }

    let body = match fmt {
        FeedFormat::Jsonl => {
            let mut lines = Vec::with_capacity(messages.len());
            for msg in &messages {
                lines.push(serde_json::to_string(msg)?);
            }
            lines.join("\n")
        }
        FeedFormat::Markdown => {
            let mut lines = Vec::with_capacity(messages.len() * 4);
            for msg in &messages {
                lines.push(format!("### {}", msg.role));
                lines.push(String::new());
                lines.push(msg.content.clone());
                lines.push(String::new());
            }
            lines.join("\n").trim().to_owned()
        }
        FeedFormat::Text => {
            let lines: Vec<String> = messages
                .iter()
                .map(|msg| format!("{}: {}", msg.role, msg.content))
                .collect();
            lines.join("\n")
        }
    };

    Ok(body + "\n")
}
