//! LLM provider configuration.
//!
//! API keys are read from `ANTHROPIC_API_KEY` or `OPENAI_API_KEY` at
//! runtime, never from the config file.

use serde::Deserialize;

/// LLM provider configuration for the `llm` matcher.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Defaults to Anthropic.
    #[serde(default)]
    pub provider: LlmProvider,

    /// Used when `provider` is `anthropic`.
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// Used when `provider` is `openai`.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            anthropic: AnthropicConfig::default(),
            openai: OpenAiConfig::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// LLM provider selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Anthropic Claude models.
    #[default]
    Anthropic,
    /// OpenAI GPT models.
    OpenAi,
}

/// Anthropic-specific configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicConfig {
    #[serde(default = "default_anthropic_model")]
    pub model: String,

    /// Lower values produce more deterministic output.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            model: default_anthropic_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// OpenAI-specific configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    #[serde(default = "default_openai_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            model: default_openai_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_anthropic_model() -> String {
    "claude-sonnet-4-5".into()
}

fn default_openai_model() -> String {
    "gpt-4o".into()
}

const fn default_temperature() -> f64 {
    0.0
}

const fn default_max_tokens() -> usize {
    2048
}

const fn default_timeout_secs() -> u64 {
    60
}
