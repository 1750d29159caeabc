//! List a directory: one line per entry with size and modification time

use super::{parse_input, path_or_current, Tool, ToolOutput};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt::Write as _;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Deserialize)]
struct ListDirectoryInput {
    #[serde(default)]
    path: Option<String>,
}

struct Entry {
    name: String,
    size: u64,
    modified: Option<DateTime<Local>>,
}

pub struct ListDirectoryTool;

impl ListDirectoryTool {
    async fn read_entries(path: &str) -> std::io::Result<Vec<Entry>> {
        let mut dir = tokio::fs::read_dir(path).await?;
        let mut entries = Vec::new();

        while let Some(entry) = dir.next_entry().await? {
            let mut name = entry.file_name().to_string_lossy().into_owned();
            // Metadata can vanish between listing and stat; keep the name anyway
            let (size, modified) = match entry.metadata().await {
                Ok(meta) => {
                    if meta.is_dir() {
                        name.push('/');
                    }
                    (meta.len(), meta.modified().ok().map(DateTime::<Local>::from))
                }
                Err(e) => {
                    tracing::debug!(entry = %name, error = %e, "Failed to stat entry");
                    (0, None)
                }
            };
            entries.push(Entry {
                name,
                size,
                modified,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn format_entries(entries: &[Entry]) -> String {
        if entries.is_empty() {
            return "(empty directory)".to_string();
        }

        let mut out = String::new();
        for entry in entries {
            let modified = entry.modified.map_or_else(
                || "unknown".to_string(),
                |t| t.format(TIMESTAMP_FORMAT).to_string(),
            );
            let _ = writeln!(out, "{} {:>10} {}", entry.name, entry.size, modified);
        }
        out
    }
}

#[async_trait]
impl Tool for ListDirectoryTool {
    fn name(&self) -> &'static str {
        "list_directory"
    }

    fn description(&self) -> String {
        "Lists files and directories in the specified path. Returns detailed file information: name, size in bytes and last modification time, one entry per line. Directory names end with '/'.".to_string()
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "required": [],
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The directory path to list. Defaults to current directory."
                }
            }
        })
    }

    async fn run(&self, input: Value) -> ToolOutput {
        let input: ListDirectoryInput = match parse_input(input) {
            Ok(i) => i,
            Err(e) => return e,
        };
        let path = path_or_current(input.path);

        match Self::read_entries(&path).await {
            Ok(entries) => ToolOutput::text(Self::format_entries(&entries)),
            Err(e) => ToolOutput::text(format!("Error listing directory {path}: {e}")),
        }
    }
}
