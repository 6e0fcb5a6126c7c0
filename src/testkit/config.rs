//! Canonical test configurations.
//!
//! Retries never sleep so failure-path tests stay fast.

use std::time::Duration;

use rust_decimal::Decimal;

use crate::application::matching::MatchSettings;
use crate::application::pipeline::PipelineConfig;
use crate::application::retry::RetryPolicy;

/// `attempts` tries with zero backoff and a generous deadline.
pub fn retry(attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts: attempts,
        initial_backoff: Duration::ZERO,
        max_backoff: Duration::ZERO,
        total_timeout: Duration::from_secs(5),
    }
}

/// Pipeline config with the default thresholds and fast retries.
pub fn pipeline() -> PipelineConfig {
    PipelineConfig {
        min_edge_bps: Decimal::from(50),
        matching: MatchSettings {
            retry: retry(3),
            ..MatchSettings::default()
        },
    }
}
