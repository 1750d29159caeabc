//! Create or overwrite a file

use super::{parse_input, Tool, ToolOutput};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
struct WriteFileInput {
    path: String,
    contents: String,
}

pub struct WriteFileTool;

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &'static str {
        "write_file"
    }

    fn description(&self) -> String {
        "Writes contents to a file at the specified path. Creates the file if it doesn't exist, overwrites if it does.".to_string()
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "required": ["path", "contents"],
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The file system path where the file should be written."
                },
                "contents": {
                    "type": "string",
                    "description": "The contents to write to the file."
                }
            }
        })
    }

    async fn run(&self, input: Value) -> ToolOutput {
        let input: WriteFileInput = match parse_input(input) {
            Ok(i) => i,
            Err(e) => return e,
        };

        match tokio::fs::write(&input.path, input.contents.as_bytes()).await {
            Ok(()) => ToolOutput::text(format!(
                "Successfully wrote {} bytes to {}",
                input.contents.len(),
                input.path
            )),
            Err(e) => ToolOutput::text(format!("Error writing file: {e}")),
        }
    }
}
