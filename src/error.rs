use std::time::Duration;

use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::platform::Platform;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures talking to a market data platform.
///
/// Every variant carries the platform it came from so the orchestrator can
/// report which side of the pipeline failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("{platform}: authentication failed: {reason}")]
    AuthenticationFailure { platform: Platform, reason: String },

    #[error("{platform}: rate limited")]
    RateLimited {
        platform: Platform,
        retry_after: Option<Duration>,
    },

    #[error("{platform}: network failure: {reason}")]
    NetworkFailure { platform: Platform, reason: String },

    #[error("{platform}: request timed out after {elapsed_ms} ms")]
    Timeout { platform: Platform, elapsed_ms: u64 },

    #[error("{platform}: integration not implemented")]
    NotImplemented { platform: Platform },
}

impl PlatformError {
    /// Platform that produced the error.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        match self {
            Self::AuthenticationFailure { platform, .. }
            | Self::RateLimited { platform, .. }
            | Self::NetworkFailure { platform, .. }
            | Self::Timeout { platform, .. }
            | Self::NotImplemented { platform } => *platform,
        }
    }

    /// Transient failures worth another attempt.
    ///
    /// Authentication failures are not retried: the credential will not
    /// become valid between attempts.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::NetworkFailure { .. })
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// The reasoning backend could not be reached or is overloaded.
    #[error("reasoning service unavailable: {0}")]
    ReasoningUnavailable(String),

    /// The reasoning backend refused the request (bad key, bad request).
    #[error("reasoning service rejected request: {0}")]
    ReasoningRejected(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Whether a bounded retry loop should attempt the call again.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Platform(err) => err.is_retryable(),
            Self::ReasoningUnavailable(_) => true,
            _ => false,
        }
    }

    /// Server-provided delay hint, if any.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Platform(PlatformError::RateLimited { retry_after, .. }) => *retry_after,
            _ => None,
        }
    }

    /// True for the expected "integration is a stub" signal.
    #[must_use]
    pub const fn is_not_implemented(&self) -> bool {
        matches!(self, Self::Platform(PlatformError::NotImplemented { .. }))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
