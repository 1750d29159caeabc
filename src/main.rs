//! Coding agent - a terminal conversation with an LLM that can use local
//! file tools
//!
//! Reads a line, sends the whole conversation to the model, runs any tools
//! it asks for, prints everything, and waits for the next line.

mod config;
mod conversation;
mod llm;
mod repl;
mod tools;

use config::AgentConfig;
use conversation::Conversation;
use llm::{AnthropicService, LlmService, LoggingService};
use std::sync::Arc;
use tools::ToolRegistry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = AgentConfig::from_env()?;

    let service: Arc<dyn LlmService> = Arc::new(AnthropicService::new(
        config.api_key.as_str(),
        config.model.as_str(),
        config.base_url.as_deref(),
    )?);
    let llm = Arc::new(LoggingService::new(service));

    let tools = ToolRegistry::standard();
    tracing::info!(
        model = %config.model,
        max_tokens = config.max_tokens,
        tools = ?tools.names(),
        "Agent ready"
    );

    let mut conversation = Conversation::new(llm, tools, config.max_tokens);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    repl::run(&mut conversation, stdin, &mut stdout).await?;

    Ok(())
}

/// Logs go to stderr so they never interleave with the conversation
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "coding_agent=warn".into());

    let json = std::env::var("AGENT_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
