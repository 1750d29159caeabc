//! Property-based tests for the Anthropic translation layer
//!
//! Translation between our internal types and the wire format must keep
//! every block, in order, so the conversation the model sees is exactly
//! the one we recorded.

use super::anthropic::{
    normalize_response, translate_message, AnthropicContentBlock, AnthropicResponse,
    AnthropicUsage,
};
use super::types::{ContentBlock, LlmMessage, MessageRole};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_text_block() -> impl Strategy<Value = ContentBlock> {
    "[a-zA-Z0-9 _.!?,]{1,100}".prop_map(|text| ContentBlock::Text { text })
}

fn arb_tool_use_block() -> impl Strategy<Value = ContentBlock> {
    (
        "toolu_[a-zA-Z0-9]{5,20}",
        prop_oneof![
            Just("get_file".to_string()),
            Just("write_file".to_string()),
            Just("list_directory".to_string()),
            Just("search_files".to_string()),
        ],
        arb_json_object(),
    )
        .prop_map(|(id, name, input)| ContentBlock::ToolUse { id, name, input })
}

fn arb_tool_result_block() -> impl Strategy<Value = ContentBlock> {
    (
        "toolu_[a-zA-Z0-9]{5,20}",
        "[a-zA-Z0-9 _.!?,:\n]{0,100}",
        any::<bool>(),
    )
        .prop_map(|(tool_use_id, content, is_error)| ContentBlock::ToolResult {
            tool_use_id,
            content,
            is_error,
        })
}

/// Small object with string values, the shape tool inputs take
fn arb_json_object() -> impl Strategy<Value = serde_json::Value> {
    proptest::collection::hash_map("[a-z_]{1,10}", "[a-zA-Z0-9 ./]{0,30}", 0..4).prop_map(|m| {
        serde_json::Value::Object(
            m.into_iter()
                .map(|(k, v)| (k, serde_json::Value::String(v)))
                .collect(),
        )
    })
}

fn arb_user_message() -> impl Strategy<Value = LlmMessage> {
    proptest::collection::vec(
        prop_oneof![
            1 => arb_text_block(),
            2 => arb_tool_result_block(),
        ],
        1..6,
    )
    .prop_map(|content| LlmMessage {
        role: MessageRole::User,
        content,
    })
}

fn arb_assistant_message() -> impl Strategy<Value = LlmMessage> {
    proptest::collection::vec(
        prop_oneof![
            1 => arb_text_block(),
            2 => arb_tool_use_block(),
        ],
        1..6,
    )
    .prop_map(|content| LlmMessage {
        role: MessageRole::Assistant,
        content,
    })
}

fn arb_message() -> impl Strategy<Value = LlmMessage> {
    prop_oneof![arb_user_message(), arb_assistant_message()]
}

/// Wire block carrying the same data as an internal block
fn to_wire_block(block: &ContentBlock) -> AnthropicContentBlock {
    match block.clone() {
        ContentBlock::Text { text } => AnthropicContentBlock::Text { text },
        ContentBlock::ToolUse { id, name, input } => {
            AnthropicContentBlock::ToolUse { id, name, input }
        }
        ContentBlock::ToolResult {
            tool_use_id,
            content,
            is_error,
        } => AnthropicContentBlock::ToolResult {
            tool_use_id,
            content,
            is_error,
        },
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Every block survives request translation, in order
    #[test]
    fn prop_translate_message_preserves_blocks(msg in arb_message()) {
        let wire = translate_message(&msg);

        let expected_role = match msg.role {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };
        prop_assert_eq!(wire.role.as_str(), expected_role);
        prop_assert_eq!(wire.content.len(), msg.content.len());

        let original = serde_json::to_value(&msg.content).unwrap();
        let translated = serde_json::to_value(&wire.content).unwrap();
        prop_assert_eq!(original, translated);
    }

    /// Text and tool-use blocks in a response come back in the order sent
    #[test]
    fn prop_normalize_response_preserves_order(msg in arb_assistant_message()) {
        let resp = AnthropicResponse {
            content: msg.content.iter().map(to_wire_block).collect(),
            stop_reason: Some("tool_use".to_string()),
            usage: AnthropicUsage {
                input_tokens: 10,
                output_tokens: 5,
            },
        };

        let normalized = normalize_response(resp);
        prop_assert_eq!(normalized.content, msg.content);
        prop_assert!(!normalized.end_turn);
    }

    /// Tool results echoed back by a misbehaving endpoint never reach the loop
    #[test]
    fn prop_normalize_response_drops_tool_results(msg in arb_user_message()) {
        let expected: Vec<ContentBlock> = msg
            .content
            .iter()
            .filter(|b| matches!(b, ContentBlock::Text { .. }))
            .cloned()
            .collect();

        let resp = AnthropicResponse {
            content: msg.content.iter().map(to_wire_block).collect(),
            stop_reason: None,
            usage: AnthropicUsage {
                input_tokens: 0,
                output_tokens: 0,
            },
        };

        prop_assert_eq!(normalize_response(resp).content, expected);
    }
}
