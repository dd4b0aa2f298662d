//! Proptest strategies for randomized documents.
//!
//! Generated documents round-trip through serde exactly: opaque block kinds
//! never collide with `"text"`, and payloads stay within the value shapes
//! the content model preserves verbatim.

use proptest::prelude::*;
use serde_json::{Map, Value};

use savepoint_core::{ContentBlock, Message, MessageContent, MessageId, Savepoint};

use crate::fixtures::deterministic_savepoint;

pub fn arb_role() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("user".to_owned()),
        Just("assistant".to_owned()),
        Just("system".to_owned()),
    ]
}

pub fn arb_content_block() -> impl Strategy<Value = ContentBlock> {
    prop_oneof![
        "[ -~]{0,24}".prop_map(ContentBlock::text),
        (
            prop_oneof![
                Just("image".to_owned()),
                Just("audio".to_owned()),
                Just("tool_use".to_owned()),
            ],
            "[a-z0-9]{0,12}",
        )
            .prop_map(|(kind, data)| ContentBlock::other(kind, Value::String(data))),
    ]
}

pub fn arb_message_content() -> impl Strategy<Value = MessageContent> {
    prop_oneof![
        prop::collection::vec(arb_content_block(), 1..4).prop_map(MessageContent::Blocks),
        "[ -~]{1,24}".prop_map(MessageContent::Legacy),
    ]
}

pub fn arb_message(index: usize) -> impl Strategy<Value = Message> {
    (arb_role(), arb_message_content()).prop_map(move |(role, content)| Message {
        id: MessageId::from_string(format!("00000000-0000-0000-0001-{index:012}")),
        role,
        content,
        created_at: format!("2026-01-01T00:{:02}:{:02}.000Z", index / 60, index % 60),
        metadata: None,
        extra: Map::new(),
    })
}

/// A bounded random document over a deterministic skeleton: history length
/// and contents vary, identity fields stay fixed.
pub fn arb_savepoint() -> impl Strategy<Value = Savepoint> {
    prop::collection::vec((arb_role(), arb_message_content()), 0..8).prop_map(|entries| {
        let mut doc = deterministic_savepoint();
        for (i, (role, content)) in entries.into_iter().enumerate() {
            doc.conversation_state.push(Message {
                id: MessageId::from_string(format!("00000000-0000-0000-0001-{i:012}")),
                role,
                content,
                created_at: format!("2026-01-01T00:{:02}:{:02}.000Z", i / 60, i % 60),
                metadata: None,
                extra: Map::new(),
            });
        }
        doc
    })
}
