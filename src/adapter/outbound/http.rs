//! Shared HTTP plumbing for platform adapters.
//!
//! Builds a `reqwest` client with the configured timeouts, wraps every GET
//! in the retry policy, and maps transport and status failures onto
//! [`PlatformError`].

use std::time::Duration;

use reqwest::header::RETRY_AFTER;
use reqwest::{Client as HttpClient, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::application::retry::RetryPolicy;
use crate::domain::platform::Platform;
use crate::error::{Error, PlatformError, Result};

/// HTTP client configuration shared by platform adapters.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Budget for a whole call including retries, in milliseconds.
    #[serde(default = "default_total_timeout_ms")]
    pub total_timeout_ms: u64,
    /// Maximum attempts for transient failures.
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,
    /// Initial backoff between retries in milliseconds.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    /// Cap on a single backoff delay in milliseconds.
    #[serde(default = "default_retry_max_backoff_ms")]
    pub retry_max_backoff_ms: u64,
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    3_000
}

const fn default_total_timeout_ms() -> u64 {
    60_000
}

const fn default_retry_max_attempts() -> u32 {
    3
}

const fn default_retry_backoff_ms() -> u64 {
    500
}

const fn default_retry_max_backoff_ms() -> u64 {
    8_000
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            total_timeout_ms: default_total_timeout_ms(),
            retry_max_attempts: default_retry_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            retry_max_backoff_ms: default_retry_max_backoff_ms(),
        }
    }
}

impl HttpSettings {
    /// Retry policy described by these settings.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry_max_attempts,
            initial_backoff: Duration::from_millis(self.retry_backoff_ms),
            max_backoff: Duration::from_millis(self.retry_max_backoff_ms),
            total_timeout: Duration::from_millis(self.total_timeout_ms),
        }
    }
}

/// A header carrying a platform credential.
#[derive(Clone)]
pub struct AuthHeader {
    name: &'static str,
    value: String,
}

impl AuthHeader {
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }

    /// `Authorization: Bearer <token>`.
    pub fn bearer(token: &str) -> Self {
        Self::new("Authorization", format!("Bearer {token}"))
    }
}

impl std::fmt::Debug for AuthHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthHeader")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .finish()
    }
}

/// JSON-over-HTTP client bound to one platform.
#[derive(Debug, Clone)]
pub struct PlatformHttp {
    platform: Platform,
    http: HttpClient,
    auth: Option<AuthHeader>,
    retry: RetryPolicy,
}

impl PlatformHttp {
    #[must_use]
    pub fn new(platform: Platform, settings: &HttpSettings, auth: Option<AuthHeader>) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .connect_timeout(Duration::from_millis(settings.connect_timeout_ms))
            .user_agent(concat!("crossedge/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            platform,
            http,
            auth,
            retry: settings.retry_policy(),
        }
    }

    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// GET `url` and decode the JSON body, retrying transient failures.
    ///
    /// # Errors
    ///
    /// Returns a [`PlatformError`] once retries are exhausted, or
    /// [`PlatformError::Timeout`] when the total budget runs out.
    pub async fn get_json<T>(&self, url: &Url) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let platform = self.platform;
        self.retry
            .run(
                "platform_get",
                || self.get_once(url),
                |elapsed| {
                    PlatformError::Timeout {
                        platform,
                        elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                    }
                    .into()
                },
            )
            .await
    }

    async fn get_once<T>(&self, url: &Url) -> Result<T>
    where
        T: DeserializeOwned,
    {
        debug!(platform = %self.platform, url = %url, "GET");
        let mut request = self.http.get(url.clone());
        if let Some(auth) = &self.auth {
            request = request.header(auth.name, &auth.value);
        }

        let response = request
            .send()
            .await
            .map_err(|err| classify_transport(self.platform, &err))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = retry_after(&response);
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(self.platform, status, retry_after, &body).into());
        }

        let body = response
            .text()
            .await
            .map_err(|err| classify_transport(self.platform, &err))?;
        serde_json::from_str(&body).map_err(|err| {
            PlatformError::NetworkFailure {
                platform: self.platform,
                reason: format!("invalid response payload: {err}"),
            }
            .into()
        })
    }
}

/// Append path segments to a base URL, ignoring a trailing slash.
///
/// # Errors
///
/// Returns [`Error::Parse`] for URLs that cannot carry a path.
pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| Error::Parse(format!("base URL cannot carry a path: {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Map a non-success status onto a platform error.
pub(crate) fn classify_status(
    platform: Platform,
    status: StatusCode,
    retry_after: Option<Duration>,
    body: &str,
) -> PlatformError {
    let snippet: String = body.chars().take(200).collect();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PlatformError::AuthenticationFailure {
            platform,
            reason: format!("{status}: {snippet}"),
        },
        StatusCode::TOO_MANY_REQUESTS => PlatformError::RateLimited {
            platform,
            retry_after,
        },
        _ => PlatformError::NetworkFailure {
            platform,
            reason: format!("{status}: {snippet}"),
        },
    }
}

fn classify_transport(platform: Platform, err: &reqwest::Error) -> PlatformError {
    let kind = if err.is_timeout() {
        "request timed out"
    } else if err.is_connect() {
        "connection failed"
    } else {
        "transport error"
    };
    PlatformError::NetworkFailure {
        platform,
        reason: format!("{kind}: {err}"),
    }
}
