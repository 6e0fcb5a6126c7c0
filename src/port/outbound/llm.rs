//! LLM completion port for the semantic matcher.

use async_trait::async_trait;

use crate::error::Result;

/// Client for large language model text completion.
///
/// Implementations wrap specific providers (Anthropic, OpenAI) and handle
/// authentication and response parsing.
///
/// # Errors
///
/// [`complete`](Self::complete) returns
/// [`Error::ReasoningUnavailable`](crate::error::Error::ReasoningUnavailable)
/// for transient failures (rate limits, 5xx, network) and
/// [`Error::ReasoningRejected`](crate::error::Error::ReasoningRejected) when
/// the provider refuses the request.
#[async_trait]
pub trait Llm: Send + Sync {
    /// Return the provider name for logging.
    fn name(&self) -> &'static str;

    /// Send a completion request and return the generated text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
