//! Semantic matching port.
//!
//! Defines the interface for deciding which markets on two platforms
//! describe the same real-world event.
//!
//! # Overview
//!
//! - [`SemanticMatcher`]: proposes cross-platform pairs
//! - [`MarketSummary`]: the price-free view of a market handed to matchers
//! - [`ProposedMatch`]: one raw proposal, by position in the input slices
//!
//! Matchers never see prices. [`MarketSummary`] has no price fields, so
//! equivalence judgements cannot be biased by the size of the edge.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::id::MarketId;
use crate::domain::market::NormalizedMarket;
use crate::error::Result;

/// Market fields relevant to equivalence, without quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketSummary {
    /// Platform-local identifier.
    pub id: MarketId,
    /// Market question.
    pub question: String,
    /// When the market resolves.
    pub resolution_time: DateTime<Utc>,
    /// Settlement rules text, if published.
    pub settlement_description: Option<String>,
    /// Canonical entity tag, if one was recognized.
    pub underlying_entity: Option<String>,
}

impl From<&NormalizedMarket> for MarketSummary {
    fn from(market: &NormalizedMarket) -> Self {
        Self {
            id: market.market_id().clone(),
            question: market.question().to_string(),
            resolution_time: market.resolution_time(),
            settlement_description: market.settlement_description().map(str::to_string),
            underlying_entity: market.underlying_entity().map(str::to_string),
        }
    }
}

/// A matcher's claim that `markets_a[index_a]` and `markets_b[index_b]`
/// resolve on the same event.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposedMatch {
    pub index_a: usize,
    pub index_b: usize,
    /// Probability-like score in `[0, 1]`.
    pub confidence: f64,
    pub rationale: String,
}

impl ProposedMatch {
    #[must_use]
    pub fn new(index_a: usize, index_b: usize, confidence: f64, rationale: impl Into<String>) -> Self {
        Self {
            index_a,
            index_b,
            confidence,
            rationale: rationale.into(),
        }
    }
}

/// Proposes equivalent market pairs across two platforms.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`); the match service
/// issues batches concurrently.
///
/// # Implementation Notes
///
/// - Indices in returned proposals refer to positions in the given slices
/// - Returning an empty vector means "no equivalent pairs", not failure
/// - Respect [`batch_limit`](Self::batch_limit); callers chunk to it
#[async_trait]
pub trait SemanticMatcher: Send + Sync {
    /// Return the matcher name for logging.
    fn name(&self) -> &'static str;

    /// Propose pairs between `markets_a` and `markets_b`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReasoningUnavailable`](crate::error::Error::ReasoningUnavailable)
    /// for transient backend failures, which callers may retry.
    async fn propose_matches(
        &self,
        markets_a: &[MarketSummary],
        markets_b: &[MarketSummary],
    ) -> Result<Vec<ProposedMatch>>;

    /// Maximum number of markets per side in a single call. Default is 20.
    fn batch_limit(&self) -> usize {
        20
    }
}
