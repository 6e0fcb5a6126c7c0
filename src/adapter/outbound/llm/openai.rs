//! OpenAI LLM client.
//!
//! Implements the [`Llm`] trait against the OpenAI Chat Completions API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{http_client, send, DEFAULT_TIMEOUT};
use crate::error::{ConfigError, Error, Result};
use crate::port::outbound::llm::Llm;

/// OpenAI Chat Completions API endpoint.
const API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI API client.
#[derive(Debug)]
pub struct OpenAi {
    client: Client,
    endpoint: String,
    api_key: String,
    /// Model identifier (e.g., "gpt-4o").
    model: String,
    max_tokens: usize,
    /// Sampling temperature (0.0 to 2.0).
    temperature: f64,
}

impl OpenAi {
    /// Create a new OpenAI client with explicit configuration.
    #[must_use]
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        max_tokens: usize,
        temperature: f64,
    ) -> Self {
        Self {
            client: http_client(DEFAULT_TIMEOUT),
            endpoint: API_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens,
            temperature,
        }
    }

    /// Create a client from the `OPENAI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            Error::Config(ConfigError::MissingField {
                field: "OPENAI_API_KEY",
            })
        })?;
        Ok(Self::new(api_key, model, 4096, 0.2))
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = http_client(timeout);
        self
    }

    /// Point the client at a compatible Chat Completions endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Serialize)]
struct Request {
    model: String,
    max_tokens: usize,
    temperature: f64,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct Response {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl Llm for OpenAi {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = Request {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            messages: vec![Message {
                role: "user",
                content: prompt.to_string(),
            }],
        };

        let builder = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request);
        let response: Response = send(self.name(), builder).await?;

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = Request {
            model: "gpt-4o".to_string(),
            max_tokens: 4096,
            temperature: 0.2,
            messages: vec![Message {
                role: "user",
                content: "Match these markets".to_string(),
            }],
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["max_tokens"], 4096);
        assert_eq!(json["temperature"], 0.2);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Match these markets");
    }

    #[test]
    fn test_response_deserialization_single_choice() {
        let json = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "model": "gpt-4o",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "{\"matches\": []}"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 15, "total_tokens": 25}
        }"#;

        let response: Response = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices.len(), 1);
        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some(r#"{"matches": []}"#)
        );
    }

    #[test]
    fn test_response_deserialization_null_content() {
        let json = r#"{
            "choices": [{"message": {"role": "assistant", "content": null}}]
        }"#;

        let response: Response = serde_json::from_str(json).unwrap();
        assert!(response.choices[0].message.content.is_none());
    }

    #[test]
    fn test_response_deserialization_empty_choices() {
        let response: Response = serde_json::from_str(r#"{ "choices": [] }"#).unwrap();
        assert!(response.choices.is_empty());
    }

    #[test]
    fn test_client_construction() {
        let client = OpenAi::new("test-api-key", "gpt-4o", 1024, 0.0);

        assert_eq!(client.api_key, "test-api-key");
        assert_eq!(client.model, "gpt-4o");
        assert_eq!(client.endpoint, API_URL);
        assert_eq!(client.name(), "openai");
    }

    #[test]
    fn test_from_env_missing_key() {
        std::env::remove_var("OPENAI_API_KEY");

        let err = OpenAi::from_env("gpt-4o").unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_unavailable() {
        let client = OpenAi::new("key", "gpt-4o", 16, 0.0)
            .with_endpoint("http://127.0.0.1:9/v1/chat/completions")
            .with_timeout(Duration::from_secs(2));

        let err = client.complete("hello").await.unwrap_err();
        assert!(matches!(err, Error::ReasoningUnavailable(_)), "{err:?}");
    }
}
