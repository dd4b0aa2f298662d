//! Rehydration prompt export.
//!
//! Produces a compact, deterministic prompt string that captures the
//! app/engine/protocol identity, recent role-tagged history, attachment
//! references, and an integrity hint for auditability.

use savepoint_core::Savepoint;

use crate::normalize::{keep_recent, normalized_messages};

/// The tag line opening every rehydration prompt.
pub const PROMPT_TAG: &str = "[Savepoint Rehydration Prompt v1]";

/// Options for [`export_rehydration_prompt`].
#[derive(Debug, Clone)]
pub struct PromptOptions {
    /// Keep only the most recent N messages. `None` or zero keeps all.
    pub limit: Option<usize>,
    /// Emit the `[Attachments]` section when attachments exist.
    pub include_attachments: bool,
    /// Emit the `[Audit]` section when a checksum is present.
    pub include_integrity: bool,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            limit: Some(20),
            include_attachments: true,
            include_integrity: true,
        }
    }
}

/// Render the rehydration prompt for a document.
///
/// Sections appear in a fixed order (header, `[History]`, optional
/// `[Attachments]`, optional `[Audit]`, `[Instruction]`), blank-line
/// separated. Output is stripped of surrounding whitespace and ends with
/// exactly one trailing newline.
pub fn export_rehydration_prompt(doc: &Savepoint, options: &PromptOptions) -> String {
    let meta = &doc.session_metadata;

    let mut header = vec![
        PROMPT_TAG.to_owned(),
        format!("App: {} {}", meta.app.name, meta.app.version)
            .trim_end()
            .to_owned(),
        format!("Engine: {} ({})", meta.engine.name, meta.engine.kind)
            .trim_end()
            .to_owned(),
        format!("Protocol: {}", doc.protocol_version).trim_end().to_owned(),
    ];
    if !doc.schema_version.is_empty() {
        header.push(format!("Schema: {}", doc.schema_version));
    }
    if !meta.id.as_str().is_empty() {
        header.push(format!("Session: {}", meta.id));
    }
    if let Some(branch) = meta.branch.as_deref().filter(|b| !b.is_empty()) {
        header.push(format!("Branch: {branch}"));
    }
    if !meta.tags.is_empty() {
        header.push(format!("Tags: {}", meta.tags.join(", ")));
    }

    // Most recent messages last, original order preserved.
    let messages = keep_recent(normalized_messages(doc), options.limit);
    let history: Vec<String> = messages
        .iter()
        .filter_map(|msg| {
            let content = msg.content.trim();
            if content.is_empty() {
                None
            } else {
                Some(format!("{}: {}", msg.role, content))
            }
        })
        .collect();

    let attachments: Vec<String> = if options.include_attachments {
        doc.attachments
            .iter()
            .filter(|att| !att.uri.is_empty())
            .map(|att| format!("- {}", att.uri))
            .collect()
    } else {
        Vec::new()
    };

    let audit: Vec<String> = if options.include_integrity
        && !doc.integrity.algorithm.is_empty()
        && !doc.integrity.checksum.is_empty()
    {
        vec![format!(
            "Integrity: {}={}",
            doc.integrity.algorithm, doc.integrity.checksum
        )]
    } else {
        Vec::new()
    };

    let mut sections = vec![
        header.join("\n"),
        String::new(),
        String::from("[History]"),
        if history.is_empty() {
            String::from("(no prior messages)")
        } else {
            history.join("\n")
        },
    ];
    if !attachments.is_empty() {
        sections.push(String::new());
        sections.push(String::from("[Attachments]"));
        sections.push(attachments.join("\n"));
    }
    if !audit.is_empty() {
        sections.push(String::new());
        sections.push(String::from("[Audit]"));
        sections.push(audit.join("\n"));
    }
    sections.push(String::new());
    sections.push(String::from("[Instruction]"));
    sections.push(String::from("Continue the session faithfully from History."));

    let mut prompt = sections.join("\n").trim().to_owned();
    prompt.push('\n');
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use savepoint_core::compute_checksum;

    fn chat_doc() -> Savepoint {
        let mut doc = Savepoint::new("MyApp", "0.3.1", "engine-x");
        doc.append_message("user", "a");
        doc.append_message("assistant", "b");
        doc.append_message("user", "c");
        doc
    }

    #[test]
    fn test_header_identity_lines() {
        let doc = chat_doc();
        let prompt = export_rehydration_prompt(&doc, &PromptOptions::default());
        let lines: Vec<&str> = prompt.lines().collect();
        assert_eq!(lines[0], PROMPT_TAG);
        assert_eq!(lines[1], "App: MyApp 0.3.1");
        assert_eq!(lines[2], "Engine: engine-x (llm)");
        assert_eq!(lines[3], "Protocol: 1.0.0");
        assert_eq!(lines[4], "Schema: 1.0.0");
        assert!(lines[5].starts_with("Session: "));
    }

    #[test]
    fn test_limit_keeps_most_recent_in_order() {
        let doc = chat_doc();
        let prompt = export_rehydration_prompt(
            &doc,
            &PromptOptions {
                limit: Some(2),
                ..PromptOptions::default()
            },
        );
        assert!(!prompt.contains("user: a"));
        let pos_b = prompt.find("assistant: b").unwrap();
        let pos_c = prompt.find("user: c").unwrap();
        assert!(pos_b < pos_c);
    }

    #[test]
    fn test_empty_history_placeholder() {
        let doc = Savepoint::new("App", "1.0", "engine-x");
        let prompt = export_rehydration_prompt(&doc, &PromptOptions::default());
        assert!(prompt.contains("[History]\n(no prior messages)"));
    }

    #[test]
    fn test_attachments_section_conditional() {
        let mut doc = chat_doc();
        doc.add_attachment("file:///data.csv");
        let with = export_rehydration_prompt(&doc, &PromptOptions::default());
        assert!(with.contains("[Attachments]\n- file:///data.csv"));

        let without = export_rehydration_prompt(
            &doc,
            &PromptOptions {
                include_attachments: false,
                ..PromptOptions::default()
            },
        );
        assert!(!without.contains("[Attachments]"));
    }

    #[test]
    fn test_audit_section_requires_checksum() {
        let mut doc = chat_doc();
        let unsealed = export_rehydration_prompt(&doc, &PromptOptions::default());
        assert!(!unsealed.contains("[Audit]"));

        let digest = compute_checksum(&mut doc).unwrap();
        let sealed = export_rehydration_prompt(&doc, &PromptOptions::default());
        assert!(sealed.contains(&format!("Integrity: sha256={digest}")));
    }

    #[test]
    fn test_branch_and_tags_lines() {
        let mut doc = chat_doc();
        doc.session_metadata.branch = Some("branch-alt".into());
        doc.session_metadata.tags = vec!["eval".into(), "draft".into()];
        let prompt = export_rehydration_prompt(&doc, &PromptOptions::default());
        assert!(prompt.contains("Branch: branch-alt"));
        assert!(prompt.contains("Tags: eval, draft"));
    }

    #[test]
    fn test_single_trailing_newline() {
        let prompt = export_rehydration_prompt(&chat_doc(), &PromptOptions::default());
        assert!(prompt.ends_with('\n'));
        assert!(!prompt.ends_with("\n\n"));
        assert!(prompt.ends_with("Continue the session faithfully from History.\n"));
    }

    #[test]
    fn test_prompt_deterministic() {
        let doc = chat_doc();
        let opts = PromptOptions::default();
        assert_eq!(
            export_rehydration_prompt(&doc, &opts),
            export_rehydration_prompt(&doc, &opts)
        );
    }
}
