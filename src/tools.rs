//! Local tools the model can ask the agent to run
//!
//! Handlers report filesystem and subprocess failures as ordinary text so
//! the model can read and reason about them. Only requests the agent cannot
//! act on at all (unknown tool, malformed input) come back flagged as errors.

mod get_file;
mod list_directory;
mod search_files;
mod write_file;

pub use get_file::GetFileTool;
pub use list_directory::ListDirectoryTool;
pub use search_files::SearchFilesTool;
pub use write_file::WriteFileTool;

use crate::llm::ToolDefinition;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Result from tool execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub output: String,
    pub is_error: bool,
}

impl ToolOutput {
    /// Output the model should read as data, including reported failures
    pub fn text(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            is_error: false,
        }
    }

    /// The request itself could not be carried out
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            output: message.into(),
            is_error: true,
        }
    }
}

/// Decode a tool's typed input, or produce the error result to send back
pub(crate) fn parse_input<T: DeserializeOwned>(input: Value) -> Result<T, ToolOutput> {
    serde_json::from_value(input).map_err(|e| ToolOutput::error(format!("Invalid input: {e}")))
}

/// Optional path argument; absent or empty means the current directory
pub(crate) fn path_or_current(path: Option<String>) -> String {
    match path {
        Some(p) if !p.is_empty() => p,
        _ => ".".to_string(),
    }
}

/// Trait for tools that can be executed by the agent
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name
    fn name(&self) -> &str;

    /// Tool description for LLM
    fn description(&self) -> String;

    /// JSON schema for tool input
    fn input_schema(&self) -> Value;

    /// Execute the tool
    async fn run(&self, input: Value) -> ToolOutput;
}

/// Collection of tools advertised to the model
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// The fixed tool set
    pub fn standard() -> Self {
        let tools: Vec<Arc<dyn Tool>> = vec![
            Arc::new(GetFileTool),
            Arc::new(WriteFileTool),
            Arc::new(ListDirectoryTool),
            Arc::new(SearchFilesTool),
        ];
        Self::with_tools(tools)
    }

    pub fn with_tools(tools: Vec<Arc<dyn Tool>>) -> Self {
        Self { tools }
    }

    /// Registered tool names, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Get all tool definitions for LLM
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description(),
                input_schema: t.input_schema(),
            })
            .collect()
    }

    /// Execute a tool by name. Unknown names produce an error result.
    pub async fn invoke(&self, name: &str, input: Value) -> ToolOutput {
        let Some(tool) = self.tools.iter().find(|t| t.name() == name) else {
            tracing::warn!(tool = %name, "Model requested unknown tool");
            return ToolOutput::error(format!("Unknown tool: {name}"));
        };

        let output = tool.run(input).await;
        tracing::debug!(
            tool = %name,
            is_error = output.is_error,
            bytes = output.output.len(),
            "Tool finished"
        );
        output
    }
}
