//! Read a whole file as text

use super::{parse_input, Tool, ToolOutput};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
struct GetFileInput {
    path: String,
}

pub struct GetFileTool;

#[async_trait]
impl Tool for GetFileTool {
    fn name(&self) -> &'static str {
        "get_file"
    }

    fn description(&self) -> String {
        "Accepts a file path, then returns the file contents.".to_string()
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "required": ["path"],
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The file system path."
                }
            }
        })
    }

    async fn run(&self, input: Value) -> ToolOutput {
        let input: GetFileInput = match parse_input(input) {
            Ok(i) => i,
            Err(e) => return e,
        };

        match tokio::fs::read(&input.path).await {
            Ok(bytes) => ToolOutput::text(String::from_utf8_lossy(&bytes)),
            Err(e) => ToolOutput::text(format!("Error reading file {}: {e}", input.path)),
        }
    }
}
