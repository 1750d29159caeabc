//! Conversation history entries

use crate::llm::{ContentBlock, LlmMessage, MessageRole};
use serde_json::Value;

/// One entry in the conversation history. Never modified once recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum Turn {
    /// Text typed by the user
    User(String),
    /// Model output, text and tool requests in the order the model produced them
    Assistant(Vec<ContentBlock>),
    /// Results for every tool request of the preceding assistant turn
    ToolResults(Vec<ToolResult>),
}

/// A tool invocation requested by the model
#[derive(Debug, Clone, PartialEq)]
pub struct ToolRequest {
    pub id: String,
    pub name: String,
    pub input: Value,
}

/// Outcome of a tool request, tagged with the originating request id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub tool_use_id: String,
    pub output: String,
    pub is_error: bool,
}

impl Turn {
    pub fn role(&self) -> MessageRole {
        match self {
            Turn::User(_) | Turn::ToolResults(_) => MessageRole::User,
            Turn::Assistant(_) => MessageRole::Assistant,
        }
    }

    /// Content blocks this turn contributes to a request
    pub fn blocks(&self) -> Vec<ContentBlock> {
        match self {
            Turn::User(text) => vec![ContentBlock::text(text.clone())],
            Turn::Assistant(content) => content.clone(),
            Turn::ToolResults(results) => results
                .iter()
                .map(|r| ContentBlock::tool_result(&r.tool_use_id, &r.output, r.is_error))
                .collect(),
        }
    }

    /// Tool requests carried by an assistant turn, in order
    pub fn tool_requests(&self) -> Vec<ToolRequest> {
        match self {
            Turn::Assistant(content) => tool_requests(content),
            Turn::User(_) | Turn::ToolResults(_) => Vec::new(),
        }
    }
}

fn tool_requests(content: &[ContentBlock]) -> Vec<ToolRequest> {
    content
        .iter()
        .filter_map(|block| match block {
            ContentBlock::ToolUse { id, name, input } => Some(ToolRequest {
                id: id.clone(),
                name: name.clone(),
                input: input.clone(),
            }),
            _ => None,
        })
        .collect()
}

/// Serialize history into endpoint messages.
///
/// The endpoint requires alternating roles, so consecutive turns with the
/// same role (tool results followed by the next user text) share a message.
/// Block order is preserved; turns with no blocks contribute nothing.
pub fn to_messages<'a>(turns: impl IntoIterator<Item = &'a Turn>) -> Vec<LlmMessage> {
    let mut messages: Vec<LlmMessage> = Vec::new();

    for turn in turns {
        let blocks = turn.blocks();
        if blocks.is_empty() {
            continue;
        }
        match messages.last_mut() {
            Some(last) if last.role == turn.role() => last.content.extend(blocks),
            _ => messages.push(LlmMessage {
                role: turn.role(),
                content: blocks,
            }),
        }
    }

    messages
}
