//! LLM adapter modules.
//!
//! Implementations of the [`Llm`](crate::port::outbound::llm::Llm) trait for
//! Anthropic Claude and OpenAI. Both map failures the same way: rate limits,
//! server errors and transport failures are `ReasoningUnavailable` (worth a
//! retry), anything else the provider refuses is `ReasoningRejected`.

pub mod anthropic;
pub mod openai;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{Error, Result};

/// Default per-request timeout for completion calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

fn http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|err| {
            warn!(error = %err, "Failed to build LLM HTTP client, using defaults");
            Client::new()
        })
}

/// Send a completion request and decode the JSON reply.
async fn send<T>(provider: &'static str, request: RequestBuilder) -> Result<T>
where
    T: DeserializeOwned,
{
    let response = request
        .send()
        .await
        .map_err(|err| Error::ReasoningUnavailable(format!("{provider}: {err}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(classify(provider, status, &body));
    }

    response
        .json::<T>()
        .await
        .map_err(|err| Error::ReasoningRejected(format!("{provider}: invalid response: {err}")))
}

fn classify(provider: &'static str, status: StatusCode, body: &str) -> Error {
    let snippet: String = body.chars().take(200).collect();
    let message = format!("{provider}: {status}: {snippet}");
    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        Error::ReasoningUnavailable(message)
    } else {
        Error::ReasoningRejected(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overload_and_server_errors_are_unavailable() {
        for status in [
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::from_u16(529).unwrap(),
        ] {
            let err = classify("anthropic", status, "overloaded");
            assert!(matches!(err, Error::ReasoningUnavailable(_)), "{status}");
            assert!(err.is_retryable());
        }
    }

    #[test]
    fn client_errors_are_rejected() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::BAD_REQUEST] {
            let err = classify("openai", status, "invalid api key");
            assert!(matches!(err, Error::ReasoningRejected(_)), "{status}");
            assert!(!err.is_retryable());
        }
    }
}
