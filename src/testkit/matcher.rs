//! Mock [`SemanticMatcher`] implementations for testing.
//!
//! - [`ScriptedMatcher`] proposes fixed pairs by market id, wherever they
//!   land in the batches it is given.
//! - [`FailingMatcher`] fails every call with `ReasoningUnavailable` and
//!   counts attempts.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::port::outbound::matcher::{MarketSummary, ProposedMatch, SemanticMatcher};

/// Proposes `(a_id, b_id, confidence)` pairs whenever both ids appear in a
/// batch.
pub struct ScriptedMatcher {
    pairs: Vec<(String, String, f64)>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedMatcher {
    pub fn new<A, B>(pairs: impl IntoIterator<Item = (A, B, f64)>) -> Self
    where
        A: Into<String>,
        B: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(a, b, c)| (a.into(), b.into(), c))
                .collect(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter of matcher calls.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl SemanticMatcher for ScriptedMatcher {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn propose_matches(
        &self,
        markets_a: &[MarketSummary],
        markets_b: &[MarketSummary],
    ) -> Result<Vec<ProposedMatch>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let position = |markets: &[MarketSummary], id: &str| {
            markets.iter().position(|m| m.id.as_str() == id)
        };
        Ok(self
            .pairs
            .iter()
            .filter_map(|(a, b, confidence)| {
                let index_a = position(markets_a, a)?;
                let index_b = position(markets_b, b)?;
                Some(ProposedMatch::new(index_a, index_b, *confidence, "scripted"))
            })
            .collect())
    }
}

/// Fails every call as if the reasoning service were down.
pub struct FailingMatcher {
    calls: Arc<AtomicUsize>,
}

impl FailingMatcher {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter of matcher calls.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

impl Default for FailingMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SemanticMatcher for FailingMatcher {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn propose_matches(
        &self,
        _markets_a: &[MarketSummary],
        _markets_b: &[MarketSummary],
    ) -> Result<Vec<ProposedMatch>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Error::ReasoningUnavailable("service unavailable".into()))
    }
}
