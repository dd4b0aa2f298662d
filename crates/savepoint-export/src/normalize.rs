//! Message normalization: collapse typed content into plain text.

use serde::{Deserialize, Serialize};
use savepoint_core::{ContentBlock, MessageContent, Savepoint};

/// A message reduced to the `{role, content}` form every export consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedMessage {
    pub role: String,
    pub content: String,
}

/// Collapse message content into a single string.
///
/// Text blocks contribute their data; every other block contributes a
/// `[<type>]` placeholder. Parts are newline-joined with empty parts
/// dropped. Legacy bare-string content is used verbatim.
pub fn coalesce_text(content: &MessageContent) -> String {
    match content {
        MessageContent::Legacy(text) => text.clone(),
        MessageContent::Blocks(blocks) => {
            let parts: Vec<String> = blocks
                .iter()
                .map(|block| match block {
                    ContentBlock::Text(data) => data.clone(),
                    other => format!("[{}]", other.kind()),
                })
                .filter(|part| !part.is_empty())
                .collect();
            parts.join("\n")
        }
    }
}

/// Normalize every message of a document, preserving chronological order.
pub fn normalized_messages(doc: &Savepoint) -> Vec<NormalizedMessage> {
    doc.conversation_state
        .iter()
        .map(|msg| NormalizedMessage {
            role: msg.role.clone(),
            content: coalesce_text(&msg.content),
        })
        .collect()
}

/// Keep only the most recent `limit` entries, in original order.
///
/// `None` or a zero limit keeps everything.
pub fn keep_recent<T>(mut items: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        if limit > 0 && items.len() > limit {
            items.drain(..items.len() - limit);
        }
    }
    items
}
