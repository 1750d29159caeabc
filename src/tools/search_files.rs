//! Search file contents with grep
//!
//! Results come back as `file:line:text` rows. A search that finds nothing
//! is an ordinary answer, not a failure.

use super::{parse_input, path_or_current, Tool, ToolOutput};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::process::Stdio;
use tokio::process::Command;

const MAX_OUTPUT_LENGTH: usize = 128 * 1024; // 128KB
const SNIP_SIZE: usize = 4 * 1024; // 4KB each end
pub const NO_MATCHES: &str = "No matches found";

#[derive(Debug, Deserialize)]
struct SearchFilesInput {
    pattern: String,
    #[serde(default)]
    path: Option<String>,
}

pub struct SearchFilesTool;

impl SearchFilesTool {
    async fn grep(pattern: &str, path: &str) -> ToolOutput {
        let output = Command::new("grep")
            .args(["-r", "-n", "-H", "-I", "--", pattern, path])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        let output = match output {
            Ok(o) => o,
            Err(e) => return ToolOutput::text(format!("Failed to run grep: {e}")),
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if output.status.success() {
            return ToolOutput::text(truncate_output(&stdout));
        }

        // Exit 1 is "nothing matched"; any silent failure reads the same way
        if stdout.is_empty() && stderr.is_empty() {
            return ToolOutput::text(NO_MATCHES);
        }

        tracing::debug!(
            pattern = %pattern,
            code = ?output.status.code(),
            "grep exited unsuccessfully"
        );
        ToolOutput::text(truncate_output(&format!("{stdout}{stderr}")))
    }
}

/// Keep the head and tail of oversized output
fn truncate_output(output: &str) -> String {
    if output.len() <= MAX_OUTPUT_LENGTH {
        return output.to_string();
    }

    let mut head_end = SNIP_SIZE;
    while !output.is_char_boundary(head_end) {
        head_end -= 1;
    }
    let mut tail_start = output.len() - SNIP_SIZE;
    while !output.is_char_boundary(tail_start) {
        tail_start += 1;
    }

    format!(
        "[output truncated in middle: got {} bytes, max is {} bytes]\n{}\n\n[snip]\n\n{}",
        output.len(),
        MAX_OUTPUT_LENGTH,
        output.get(..head_end).unwrap_or_default(),
        output.get(tail_start..).unwrap_or_default()
    )
}

#[async_trait]
impl Tool for SearchFilesTool {
    fn name(&self) -> &'static str {
        "search_files"
    }

    fn description(&self) -> String {
        "Searches for a pattern in files using grep. Returns matching lines with line numbers, formatted as file:line:text.".to_string()
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "required": ["pattern"],
            "properties": {
                "pattern": {
                    "type": "string",
                    "description": "The search pattern to look for."
                },
                "path": {
                    "type": "string",
                    "description": "The path to search in. Defaults to current directory."
                }
            }
        })
    }

    async fn run(&self, input: Value) -> ToolOutput {
        let input: SearchFilesInput = match parse_input(input) {
            Ok(i) => i,
            Err(e) => return e,
        };
        let path = path_or_current(input.path);

        Self::grep(&input.pattern, &path).await
    }
}
