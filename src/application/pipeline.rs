//! End-to-end detection pipeline.
//!
//! fetch (both platforms, concurrently) -> normalize -> filter -> match ->
//! price -> assemble -> sort. Each run is independent and tagged with a
//! fresh run id on its tracing span.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use super::assembler::OpportunityAssembler;
use super::filter::filter_comparable;
use super::matching::{MatchService, MatchSettings};
use super::normalize::normalize_all;
use crate::domain::error::DomainError;
use crate::domain::money::BasisPoints;
use crate::domain::opportunity::ArbitrageOpportunity;
use crate::error::{ConfigError, Result};
use crate::port::inbound::report::RunStats;
use crate::port::outbound::matcher::SemanticMatcher;
use crate::port::outbound::source::MarketSource;

/// Explicit pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Opportunities must exceed this edge.
    pub min_edge_bps: BasisPoints,
    pub matching: MatchSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_edge_bps: Decimal::from(50),
            matching: MatchSettings::default(),
        }
    }
}

/// Output of one run.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// Sorted by edge, largest first.
    pub opportunities: Vec<ArbitrageOpportunity>,
    pub stats: RunStats,
}

/// Cross-platform arbitrage detector.
pub struct Pipeline {
    source_a: Arc<dyn MarketSource>,
    source_b: Arc<dyn MarketSource>,
    matching: MatchService,
    assembler: OpportunityAssembler,
}

impl Pipeline {
    /// Wire a pipeline from its ports.
    ///
    /// # Errors
    ///
    /// Returns an error if both sources read the same platform or the
    /// thresholds are out of range.
    pub fn try_new(
        source_a: Arc<dyn MarketSource>,
        source_b: Arc<dyn MarketSource>,
        matcher: Arc<dyn SemanticMatcher>,
        config: PipelineConfig,
    ) -> Result<Self> {
        if source_a.platform() == source_b.platform() {
            return Err(DomainError::SamePlatform {
                platform: source_a.platform(),
            }
            .into());
        }
        if config.min_edge_bps <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "min_edge_bps",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !(0.0..=1.0).contains(&config.matching.min_confidence) {
            return Err(ConfigError::InvalidValue {
                field: "min_confidence",
                reason: "must be between 0 and 1".to_string(),
            }
            .into());
        }

        Ok(Self {
            source_a,
            source_b,
            matching: MatchService::new(matcher, config.matching),
            assembler: OpportunityAssembler::new(config.min_edge_bps),
        })
    }

    /// Run the pipeline against the current time.
    ///
    /// # Errors
    ///
    /// Returns the first platform fetch failure. Matching failures degrade
    /// to an empty result instead.
    pub async fn run(&self) -> Result<PipelineOutcome> {
        self.run_at(Utc::now()).await
    }

    /// Run the pipeline treating `now` as the current time.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<PipelineOutcome> {
        let run_id = Uuid::new_v4();
        let span = info_span!("pipeline", %run_id);
        self.execute(run_id, now).instrument(span).await
    }

    async fn execute(&self, run_id: Uuid, now: DateTime<Utc>) -> Result<PipelineOutcome> {
        let mut stats = RunStats::default();

        info!(
            platform_a = %self.source_a.platform(),
            platform_b = %self.source_b.platform(),
            matcher = self.matching.matcher_name(),
            "Fetching markets"
        );
        let (listings_a, listings_b) = tokio::try_join!(
            self.source_a.fetch_active_markets(),
            self.source_b.fetch_active_markets()
        )?;
        stats.fetched_a = listings_a.len();
        stats.fetched_b = listings_b.len();

        let normalized_a = normalize_all(&listings_a);
        let normalized_b = normalize_all(&listings_b);
        stats.normalized = normalized_a.markets.len() + normalized_b.markets.len();
        stats.malformed = normalized_a.malformed + normalized_b.malformed;

        let markets_a = filter_comparable(normalized_a.markets, now);
        let markets_b = filter_comparable(normalized_b.markets, now);
        stats.comparable = markets_a.len() + markets_b.len();
        info!(
            comparable_a = markets_a.len(),
            comparable_b = markets_b.len(),
            malformed = stats.malformed,
            "Markets ready for matching"
        );

        let matched = self.matching.find_candidates(&markets_a, &markets_b).await;
        stats.eligible_pairs = matched.eligible_pairs;
        stats.candidates = matched.candidates.len();
        stats.matching_degraded = matched.degraded;

        let mut opportunities = Vec::new();
        for candidate in matched.candidates {
            if let Some(opportunity) = self.assembler.assemble(candidate, now)? {
                opportunities.push(opportunity);
            }
        }
        opportunities.sort_by(|x, y| {
            y.edge_bps()
                .cmp(&x.edge_bps())
                .then_with(|| x.market_a().market_id().cmp(y.market_a().market_id()))
                .then_with(|| x.market_b().market_id().cmp(y.market_b().market_id()))
        });
        stats.opportunities = opportunities.len();

        info!(
            opportunities = stats.opportunities,
            candidates = stats.candidates,
            degraded = stats.matching_degraded,
            "Pipeline run complete"
        );

        Ok(PipelineOutcome {
            run_id,
            generated_at: now,
            opportunities,
            stats,
        })
    }
}
