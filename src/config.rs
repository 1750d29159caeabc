//! Agent configuration, read once from the environment at startup

use thiserror::Error;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no API key configured; set ANTHROPIC_KEY or ANTHROPIC_API_KEY")]
    MissingApiKey,
    #[error("AGENT_MAX_TOKENS must be a positive integer, got {0:?}")]
    InvalidMaxTokens(String),
}

/// Configuration for the agent
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    /// Alternate endpoint root (proxy or gateway)
    pub base_url: Option<String>,
}

impl AgentConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("ANTHROPIC_KEY")
            .or_else(|| get("ANTHROPIC_API_KEY"))
            .ok_or(ConfigError::MissingApiKey)?;

        let max_tokens = match get("AGENT_MAX_TOKENS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::InvalidMaxTokens(raw.clone()))?,
            None => DEFAULT_MAX_TOKENS,
        };

        Ok(Self {
            api_key,
            model: get("AGENT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens,
            base_url: get("ANTHROPIC_BASE_URL"),
        })
    }
}
