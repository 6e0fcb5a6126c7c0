//! Cross-platform match service around the [`SemanticMatcher`] port.
//!
//! Responsibilities, in order:
//!
//! 1. Pre-block pairs that cannot be the same event (resolution times too far
//!    apart, or conflicting entity tags).
//! 2. Batch both sides to the matcher's `batch_limit` and issue batches
//!    concurrently under a semaphore, each wrapped in the retry policy.
//! 3. Validate proposals (indices, confidence floor, eligibility).
//! 4. Resolve conflicts so each market appears in at most one candidate.
//!
//! Any matcher failure that survives the retry policy degrades the run to
//! zero candidates rather than failing it.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;
use futures_util::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use super::retry::RetryPolicy;
use crate::domain::market::NormalizedMarket;
use crate::domain::matching::MatchCandidate;
use crate::error::{Error, Result};
use crate::port::outbound::matcher::{MarketSummary, ProposedMatch, SemanticMatcher};

/// Match service configuration.
#[derive(Debug, Clone)]
pub struct MatchSettings {
    /// Proposals below this confidence are discarded.
    pub min_confidence: f64,
    /// Largest resolution-time gap between markets that may pair.
    pub max_resolution_delta: Duration,
    /// Maximum matcher calls in flight.
    pub concurrency: usize,
    /// Retry envelope for each matcher call.
    pub retry: RetryPolicy,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            min_confidence: 0.7,
            max_resolution_delta: Duration::hours(24),
            concurrency: 4,
            retry: RetryPolicy::default(),
        }
    }
}

/// Result of a matching pass.
#[derive(Debug, Default)]
pub struct MatchOutcome {
    /// Accepted candidates, highest confidence first.
    pub candidates: Vec<MatchCandidate>,
    /// Pairs that survived pre-blocking.
    pub eligible_pairs: usize,
    /// True when the matcher failed and no candidates were produced.
    pub degraded: bool,
}

/// One matcher call: global indices for each side.
#[derive(Debug)]
struct Batch {
    a: Vec<usize>,
    b: Vec<usize>,
}

/// A validated proposal in global index space.
#[derive(Debug)]
struct Scored {
    a: usize,
    b: usize,
    confidence: f64,
    delta: Duration,
    rationale: String,
}

/// Finds cross-platform candidates with a pluggable matcher.
pub struct MatchService {
    matcher: Arc<dyn SemanticMatcher>,
    settings: MatchSettings,
}

impl MatchService {
    #[must_use]
    pub fn new(matcher: Arc<dyn SemanticMatcher>, settings: MatchSettings) -> Self {
        Self { matcher, settings }
    }

    /// Name of the underlying matcher.
    #[must_use]
    pub fn matcher_name(&self) -> &'static str {
        self.matcher.name()
    }

    #[must_use]
    pub const fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    /// True if the two markets may describe the same event.
    fn eligible(&self, a: &NormalizedMarket, b: &NormalizedMarket) -> bool {
        a.resolution_delta(b) <= self.settings.max_resolution_delta
            && a.same_entity(b) != Some(false)
    }

    /// Propose and resolve candidates between the two market sets.
    pub async fn find_candidates(
        &self,
        markets_a: &[NormalizedMarket],
        markets_b: &[NormalizedMarket],
    ) -> MatchOutcome {
        let eligible_pairs: usize = markets_a
            .iter()
            .map(|a| markets_b.iter().filter(|b| self.eligible(a, b)).count())
            .sum();

        if eligible_pairs == 0 {
            debug!("No eligible pairs after pre-blocking");
            return MatchOutcome::default();
        }

        let batches = self.plan_batches(markets_a, markets_b);
        info!(
            matcher = self.matcher.name(),
            eligible_pairs,
            batches = batches.len(),
            "Matching markets"
        );

        let proposals = match self.run_batches(&batches, markets_a, markets_b).await {
            Ok(proposals) => proposals,
            Err(error) => {
                warn!(
                    matcher = self.matcher.name(),
                    error = %error,
                    "Matcher unavailable, continuing with no candidates"
                );
                return MatchOutcome {
                    candidates: Vec::new(),
                    eligible_pairs,
                    degraded: true,
                };
            }
        };

        let scored = self.validate(proposals, markets_a, markets_b);
        let candidates = resolve_conflicts(scored)
            .into_iter()
            .filter_map(|s| {
                MatchCandidate::try_new(
                    markets_a[s.a].clone(),
                    markets_b[s.b].clone(),
                    s.confidence,
                    s.rationale,
                )
                .map_err(|error| warn!(error = %error, "Discarding invalid candidate"))
                .ok()
            })
            .collect::<Vec<_>>();

        info!(candidates = candidates.len(), "Matching complete");
        MatchOutcome {
            candidates,
            eligible_pairs,
            degraded: false,
        }
    }

    /// Chunk platform A by resolution time, then pair each chunk with the
    /// platform-B markets eligible for at least one of its members.
    fn plan_batches(
        &self,
        markets_a: &[NormalizedMarket],
        markets_b: &[NormalizedMarket],
    ) -> Vec<Batch> {
        let limit = self.matcher.batch_limit().max(1);

        let mut order_a: Vec<usize> = (0..markets_a.len()).collect();
        order_a.sort_by_key(|&i| (markets_a[i].resolution_time(), i));

        let mut batches = Vec::new();
        for chunk_a in order_a.chunks(limit) {
            let pool_b: Vec<usize> = (0..markets_b.len())
                .filter(|&j| {
                    chunk_a
                        .iter()
                        .any(|&i| self.eligible(&markets_a[i], &markets_b[j]))
                })
                .collect();
            for chunk_b in pool_b.chunks(limit) {
                batches.push(Batch {
                    a: chunk_a.to_vec(),
                    b: chunk_b.to_vec(),
                });
            }
        }
        batches
    }

    /// Issue every batch, bounded by the concurrency limit. Returns
    /// proposals translated to global indices, or the first failure.
    async fn run_batches(
        &self,
        batches: &[Batch],
        markets_a: &[NormalizedMarket],
        markets_b: &[NormalizedMarket],
    ) -> Result<Vec<ProposedMatch>> {
        let semaphore = Semaphore::new(self.settings.concurrency.max(1));

        let calls = batches.iter().enumerate().map(|(n, batch)| {
            let semaphore = &semaphore;
            async move {
                let _permit = semaphore
                    .acquire()
                    .await
                    .map_err(|_| Error::ReasoningUnavailable("matcher pool closed".into()))?;

                let summaries_a: Vec<MarketSummary> =
                    batch.a.iter().map(|&i| (&markets_a[i]).into()).collect();
                let summaries_b: Vec<MarketSummary> =
                    batch.b.iter().map(|&j| (&markets_b[j]).into()).collect();

                let proposals = self
                    .settings
                    .retry
                    .run(
                        "semantic_match",
                        || self.matcher.propose_matches(&summaries_a, &summaries_b),
                        reasoning_timeout,
                    )
                    .await?;

                debug!(batch = n, proposals = proposals.len(), "Batch matched");
                Ok::<_, Error>(translate(batch, proposals))
            }
        });

        let mut all = Vec::new();
        for result in join_all(calls).await {
            all.extend(result?);
        }
        Ok(all)
    }

    /// Drop proposals that are out of range, below the floor, or ineligible,
    /// keeping the most confident proposal per pair.
    fn validate(
        &self,
        proposals: Vec<ProposedMatch>,
        markets_a: &[NormalizedMarket],
        markets_b: &[NormalizedMarket],
    ) -> Vec<Scored> {
        let mut best: BTreeMap<(usize, usize), Scored> = BTreeMap::new();

        for p in proposals {
            let (Some(a), Some(b)) = (markets_a.get(p.index_a), markets_b.get(p.index_b)) else {
                warn!(
                    index_a = p.index_a,
                    index_b = p.index_b,
                    "Proposal index out of range"
                );
                continue;
            };
            if !(0.0..=1.0).contains(&p.confidence) {
                warn!(confidence = p.confidence, "Proposal confidence out of range");
                continue;
            }
            if p.confidence < self.settings.min_confidence {
                debug!(
                    market_a = %a.market_id(),
                    market_b = %b.market_id(),
                    confidence = p.confidence,
                    "Proposal below confidence floor"
                );
                continue;
            }
            if !self.eligible(a, b) {
                debug!(
                    market_a = %a.market_id(),
                    market_b = %b.market_id(),
                    "Proposal fails pre-blocking"
                );
                continue;
            }

            let scored = Scored {
                a: p.index_a,
                b: p.index_b,
                confidence: p.confidence,
                delta: a.resolution_delta(b),
                rationale: p.rationale,
            };
            let key = (p.index_a, p.index_b);
            match best.get(&key) {
                Some(existing) if existing.confidence >= scored.confidence => {}
                _ => {
                    best.insert(key, scored);
                }
            }
        }

        best.into_values().collect()
    }
}

/// Map batch-local indices to global ones, dropping out-of-range entries.
fn translate(batch: &Batch, proposals: Vec<ProposedMatch>) -> Vec<ProposedMatch> {
    proposals
        .into_iter()
        .filter_map(|p| {
            let a = batch.a.get(p.index_a).copied();
            let b = batch.b.get(p.index_b).copied();
            match (a, b) {
                (Some(index_a), Some(index_b)) => Some(ProposedMatch {
                    index_a,
                    index_b,
                    ..p
                }),
                _ => {
                    warn!(
                        index_a = p.index_a,
                        index_b = p.index_b,
                        "Matcher returned index outside its batch"
                    );
                    None
                }
            }
        })
        .collect()
}

/// Greedy one-to-one assignment.
///
/// Highest confidence first; ties go to the smaller resolution-time gap,
/// then the lower platform-A index, then the lower platform-B index.
fn resolve_conflicts(mut scored: Vec<Scored>) -> Vec<Scored> {
    scored.sort_by(|x, y| {
        y.confidence
            .total_cmp(&x.confidence)
            .then(x.delta.cmp(&y.delta))
            .then(x.a.cmp(&y.a))
            .then(x.b.cmp(&y.b))
    });

    let mut used_a = HashSet::new();
    let mut used_b = HashSet::new();
    scored
        .into_iter()
        .filter(|s| {
            if used_a.contains(&s.a) || used_b.contains(&s.b) {
                return false;
            }
            used_a.insert(s.a);
            used_b.insert(s.b);
            true
        })
        .collect()
}

fn reasoning_timeout(elapsed: StdDuration) -> Error {
    Error::ReasoningUnavailable(format!("timed out after {} ms", elapsed.as_millis()))
}
