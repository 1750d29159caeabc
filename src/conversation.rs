//! Conversation loop
//!
//! Each call to [`Conversation::advance`] is one request/response cycle:
//! the user's text goes out with the whole history and the tool
//! declarations, the model's reply is recorded, and every tool it asked for
//! runs locally, in the order requested. The results are recorded as a
//! single batched turn that rides along with the next request.

mod turn;

#[cfg(test)]
mod proptests;

pub use turn::{to_messages, ToolRequest, ToolResult, Turn};

use crate::llm::{ContentBlock, LlmError, LlmRequest, LlmService, Usage};
use crate::tools::ToolRegistry;
use std::sync::Arc;

/// A tool request and what running it produced
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub request: ToolRequest,
    pub result: ToolResult,
}

/// Everything one cycle produced, for display
#[derive(Debug, Clone)]
pub struct Exchange {
    /// The assistant turn's content
    pub content: Vec<ContentBlock>,
    /// Tools run for this turn, in request order
    pub tool_calls: Vec<ToolCall>,
    pub usage: Usage,
}

/// Progress within a cycle, reported as it happens
#[derive(Debug, Clone, Copy)]
pub enum CycleEvent<'a> {
    /// The model replied; its tools have not run yet
    Reply(&'a [ContentBlock]),
    /// One requested tool finished
    ToolFinished(&'a ToolCall),
}

pub struct Conversation {
    llm: Arc<dyn LlmService>,
    tools: ToolRegistry,
    max_tokens: u32,
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new(llm: Arc<dyn LlmService>, tools: ToolRegistry, max_tokens: u32) -> Self {
        Self {
            llm,
            tools,
            max_tokens,
            turns: Vec::new(),
        }
    }

    /// Recorded history, oldest first
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Run one cycle for `input`.
    ///
    /// On a remote failure nothing is recorded: the user turn is committed
    /// together with the reply, so history never ends in an unanswered turn.
    ///
    /// `on_event` sees the reply before any tool runs and each tool call as
    /// it finishes.
    pub async fn advance(
        &mut self,
        input: &str,
        mut on_event: impl FnMut(CycleEvent<'_>),
    ) -> Result<Exchange, LlmError> {
        let user = Turn::User(input.to_string());

        let request = LlmRequest {
            messages: to_messages(self.turns.iter().chain(std::iter::once(&user))),
            tools: self.tools.definitions(),
            max_tokens: self.max_tokens,
        };

        let response = self.llm.complete(&request).await?;

        let assistant = Turn::Assistant(response.content.clone());
        let requests = assistant.tool_requests();
        self.turns.push(user);
        self.turns.push(assistant);
        on_event(CycleEvent::Reply(&response.content));

        let mut tool_calls = Vec::with_capacity(requests.len());
        for request in requests {
            tracing::debug!(id = %request.id, tool = %request.name, "Running tool");
            let output = self.tools.invoke(&request.name, request.input.clone()).await;
            let result = ToolResult {
                tool_use_id: request.id.clone(),
                output: output.output,
                is_error: output.is_error,
            };
            let call = ToolCall { request, result };
            on_event(CycleEvent::ToolFinished(&call));
            tool_calls.push(call);
        }

        if !tool_calls.is_empty() {
            self.turns.push(Turn::ToolResults(
                tool_calls.iter().map(|c| c.result.clone()).collect(),
            ));
        }

        tracing::info!(
            turns = self.turns.len(),
            tools_run = tool_calls.len(),
            "Conversation advanced"
        );

        Ok(Exchange {
            content: response.content,
            tool_calls,
            usage: response.usage,
        })
    }
}
