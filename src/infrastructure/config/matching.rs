//! Semantic matching configuration.

use chrono::Duration;
use serde::Deserialize;

use crate::application::matching::MatchSettings;
use crate::application::retry::RetryPolicy;

/// Which [`SemanticMatcher`](crate::port::outbound::matcher::SemanticMatcher)
/// implementation to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatcherKind {
    /// Language-model judgement via the `[llm]` provider.
    Llm,
    /// Offline token-overlap heuristic.
    #[default]
    Keyword,
}

impl std::fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Llm => write!(f, "llm"),
            Self::Keyword => write!(f, "keyword"),
        }
    }
}

/// `[matching]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingConfig {
    #[serde(default)]
    pub matcher: MatcherKind,
    /// Proposals below this confidence are discarded.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
    /// Maximum matcher calls in flight.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Markets resolving further apart than this never pair.
    #[serde(default = "default_max_resolution_delta_hours")]
    pub max_resolution_delta_hours: u32,
    /// Markets per side in one LLM prompt.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Minimum overlap score for the keyword matcher.
    #[serde(default = "default_keyword_min_score")]
    pub keyword_min_score: f64,
}

const fn default_min_confidence() -> f64 {
    0.7
}

const fn default_concurrency() -> usize {
    4
}

const fn default_max_resolution_delta_hours() -> u32 {
    24
}

const fn default_batch_size() -> usize {
    15
}

const fn default_keyword_min_score() -> f64 {
    0.5
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            matcher: MatcherKind::default(),
            min_confidence: default_min_confidence(),
            concurrency: default_concurrency(),
            max_resolution_delta_hours: default_max_resolution_delta_hours(),
            batch_size: default_batch_size(),
            keyword_min_score: default_keyword_min_score(),
        }
    }
}

impl MatchingConfig {
    /// Match service settings, with `retry` wrapping each matcher call.
    #[must_use]
    pub fn settings(&self, retry: RetryPolicy) -> MatchSettings {
        MatchSettings {
            min_confidence: self.min_confidence,
            max_resolution_delta: Duration::hours(i64::from(self.max_resolution_delta_hours)),
            concurrency: self.concurrency,
            retry,
        }
    }
}
