//! Terminal driver: prompt, read a line, run a cycle, print what happened

use crate::conversation::{Conversation, CycleEvent, ToolCall};
use crate::llm::{ContentBlock, LlmError};
use std::fmt::Write as _;
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

pub const PROMPT: &str = "What do you want?";
const MIN_INPUT_CHARS: usize = 2;

fn color(s: &str) -> String {
    format!("\x1b[1;33m{s}\x1b[0m")
}

/// Prompt until a line of at least two characters arrives. `None` on EOF.
pub async fn read_input<R, W>(lines: &mut Lines<R>, out: &mut W) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    loop {
        writeln!(out, "{PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            return Ok(None);
        };
        let line = line.trim_end_matches('\r');
        if line.chars().count() >= MIN_INPUT_CHARS {
            return Ok(Some(line.to_string()));
        }
    }
}

/// Assistant text and tool requests, printed before any tool runs
pub fn render_reply(content: &[ContentBlock]) -> String {
    let mut out = String::new();

    let _ = write!(out, "{}", color("[assistant]: "));
    for block in content {
        match block {
            ContentBlock::Text { text } => {
                let _ = writeln!(out, "{text}\n");
            }
            ContentBlock::ToolUse { name, input, .. } => {
                let _ = writeln!(out, "{name}: {input}\n");
            }
            ContentBlock::ToolResult { .. } => {}
        }
    }

    out
}

pub fn render_tool_call(call: &ToolCall) -> String {
    let label = format!("[user ({})]: ", call.request.name);
    let marker = if call.result.is_error { "[error] " } else { "" };
    format!("{}{marker}{}\n", color(&label), call.result.output)
}

pub fn render_error(err: &LlmError) -> String {
    if err.kind.is_retryable() {
        format!("error: {err} (this looks transient; try again)")
    } else {
        format!("error: {err}")
    }
}

/// Drive the conversation until input runs out.
///
/// A failed cycle is reported and the loop keeps going; only I/O errors on
/// the terminal itself end it early.
pub async fn run<R, W>(conversation: &mut Conversation, input: R, out: &mut W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    while let Some(line) = read_input(&mut lines, out).await? {
        let mut write_error = None;
        let result = conversation
            .advance(&line, |event| {
                if write_error.is_some() {
                    return;
                }
                let text = match event {
                    CycleEvent::Reply(content) => render_reply(content),
                    CycleEvent::ToolFinished(call) => render_tool_call(call),
                };
                if let Err(e) = write!(out, "{text}").and_then(|()| out.flush()) {
                    write_error = Some(e);
                }
            })
            .await;
        if let Some(e) = write_error {
            return Err(e);
        }

        match result {
            Ok(exchange) => tracing::debug!(
                blocks = exchange.content.len(),
                tools_run = exchange.tool_calls.len(),
                input_tokens = exchange.usage.input_tokens,
                output_tokens = exchange.usage.output_tokens,
                "Cycle complete"
            ),
            Err(e) => writeln!(out, "{}", render_error(&e))?,
        }
        out.flush()?;
    }

    tracing::info!(turns = conversation.turns().len(), "Input closed");
    Ok(())
}
