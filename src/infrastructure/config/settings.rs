//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; platform credentials come from
//! the environment (`KALSHI_API_KEY`, `POLYMARKET_API_KEY`) and never from
//! the file.
//!
//! # Example
//!
//! ```no_run
//! use crossedge::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::llm::LlmConfig;
use super::logging::LoggingConfig;
use super::matching::MatchingConfig;
use super::server::ServerConfig;
use super::thresholds::ThresholdsConfig;
use crate::adapter::outbound::http::HttpSettings;
use crate::adapter::outbound::kalshi::KalshiConfig;
use crate::adapter::outbound::polymarket::PolymarketConfig;
use crate::application::pipeline::PipelineConfig;
use crate::error::{ConfigError, Result};

/// Credentials read from the environment.
#[derive(Clone, Default)]
pub struct Secrets {
    pub kalshi_api_key: Option<String>,
    pub polymarket_api_key: Option<String>,
}

impl Secrets {
    /// Read credentials from the process environment. Blank values count as
    /// unset.
    #[must_use]
    pub fn from_env() -> Self {
        let read = |name: &str| {
            std::env::var(name)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            kalshi_api_key: read("KALSHI_API_KEY"),
            polymarket_api_key: read("POLYMARKET_API_KEY"),
        }
    }
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |v: &Option<String>| if v.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("Secrets")
            .field("kalshi_api_key", &mask(&self.kalshi_api_key))
            .field("polymarket_api_key", &mask(&self.polymarket_api_key))
            .finish()
    }
}

/// Main application configuration.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Platform A.
    #[serde(default)]
    pub kalshi: KalshiConfig,

    /// Platform B.
    #[serde(default)]
    pub polymarket: PolymarketConfig,

    /// Timeouts and retry envelope for every outbound call.
    #[serde(default)]
    pub network: HttpSettings,

    #[serde(default)]
    pub matching: MatchingConfig,

    #[serde(default)]
    pub thresholds: ThresholdsConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(skip)]
    pub secrets: Secrets,
}

impl Config {
    /// Parse configuration from TOML content and read secrets from the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.secrets = Secrets::from_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Defaults plus environment secrets, for running without a file.
    #[must_use]
    pub fn from_env_defaults() -> Self {
        Self {
            secrets: Secrets::from_env(),
            ..Self::default()
        }
    }

    /// Check that values are within acceptable ranges.
    ///
    /// # Errors
    ///
    /// Returns the first offending field as [`ConfigError::InvalidValue`]
    /// or [`ConfigError::MissingField`].
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.kalshi.api_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "kalshi.api_url",
            }
            .into());
        }
        if self.polymarket.gamma_api_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "polymarket.gamma_api_url",
            }
            .into());
        }
        positive("kalshi.page_size", self.kalshi.page_size)?;
        positive("kalshi.max_pages", self.kalshi.max_pages)?;
        positive("polymarket.page_size", self.polymarket.page_size)?;
        positive("polymarket.max_pages", self.polymarket.max_pages)?;

        positive("network.timeout_ms", self.network.timeout_ms)?;
        positive("network.connect_timeout_ms", self.network.connect_timeout_ms)?;
        positive("network.total_timeout_ms", self.network.total_timeout_ms)?;
        positive(
            "network.retry_max_attempts",
            u64::from(self.network.retry_max_attempts),
        )?;
        if self.network.retry_max_backoff_ms < self.network.retry_backoff_ms {
            return Err(invalid(
                "network.retry_max_backoff_ms",
                "must be at least retry_backoff_ms",
            ));
        }

        if !(0.0..=1.0).contains(&self.matching.min_confidence) {
            return Err(invalid("matching.min_confidence", "must be between 0 and 1"));
        }
        if !(0.0..=1.0).contains(&self.matching.keyword_min_score) {
            return Err(invalid(
                "matching.keyword_min_score",
                "must be between 0 and 1",
            ));
        }
        positive("matching.concurrency", self.matching.concurrency)?;
        positive("matching.batch_size", self.matching.batch_size)?;
        positive(
            "matching.max_resolution_delta_hours",
            u64::from(self.matching.max_resolution_delta_hours),
        )?;

        if self.thresholds.min_edge_bps <= Decimal::ZERO {
            return Err(invalid("thresholds.min_edge_bps", "must be greater than 0"));
        }
        positive("llm.timeout_secs", self.llm.timeout_secs)?;

        if self.server.bind.parse::<SocketAddr>().is_err() {
            return Err(invalid("server.bind", "must be a socket address like 127.0.0.1:8080"));
        }

        Ok(())
    }

    /// Pipeline thresholds and matching settings.
    #[must_use]
    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            min_edge_bps: self.thresholds.min_edge_bps,
            matching: self.matching.settings(self.network.retry_policy()),
        }
    }

    /// LLM request timeout.
    #[must_use]
    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm.timeout_secs)
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn invalid(field: &'static str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
    .into()
}

#[allow(clippy::result_large_err)]
fn positive<T>(field: &'static str, value: T) -> Result<()>
where
    T: PartialOrd + Default,
{
    if value > T::default() {
        Ok(())
    } else {
        Err(invalid(field, "must be greater than 0"))
    }
}
