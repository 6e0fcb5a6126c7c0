//! Opportunity assembly: pricing, thresholding and risk annotation.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::domain::edge::{Edge, HedgeLeg};
use crate::domain::error::DomainError;
use crate::domain::matching::MatchCandidate;
use crate::domain::money::BasisPoints;
use crate::domain::opportunity::ArbitrageOpportunity;
use crate::domain::risk::Risk;

/// Matcher confidence under which a pairing is flagged for review.
const REVIEW_CONFIDENCE: f64 = 0.9;

/// Edges above this are more often bad data than free money.
const SUSPICIOUS_EDGE_BPS: Decimal = dec!(2000);

/// Resolution-time gaps beyond this are called out explicitly.
fn drift_tolerance() -> Duration {
    Duration::hours(1)
}

/// Turns priced candidates into reportable opportunities.
#[derive(Debug, Clone)]
pub struct OpportunityAssembler {
    min_edge_bps: BasisPoints,
}

impl OpportunityAssembler {
    #[must_use]
    pub const fn new(min_edge_bps: BasisPoints) -> Self {
        Self { min_edge_bps }
    }

    #[must_use]
    pub const fn min_edge_bps(&self) -> BasisPoints {
        self.min_edge_bps
    }

    /// Price the candidate and package it if the edge clears the threshold.
    ///
    /// Returns `Ok(None)` when the pair is not an opportunity.
    ///
    /// # Errors
    ///
    /// Propagates domain validation failures from assembling the result.
    pub fn assemble(
        &self,
        candidate: MatchCandidate,
        detected_at: DateTime<Utc>,
    ) -> Result<Option<ArbitrageOpportunity>, DomainError> {
        let edge = Edge::calculate(&candidate);

        if !edge.is_opportunity() || edge.edge_bps <= self.min_edge_bps {
            debug!(
                market_a = %candidate.market_a().market_id(),
                market_b = %candidate.market_b().market_id(),
                combined_cost = %edge.combined_cost,
                edge_bps = %edge.edge_bps,
                "Below edge threshold"
            );
            return Ok(None);
        }

        let description = describe(&candidate, &edge);
        let risks = assess_risks(&candidate, &edge);
        ArbitrageOpportunity::try_new(candidate, edge, description, risks, detected_at).map(Some)
    }
}

fn describe(candidate: &MatchCandidate, edge: &Edge) -> String {
    let a = candidate.market_a();
    let b = candidate.market_b();
    let (price_a, price_b) = match edge.leg {
        HedgeLeg::YesANoB => (a.yes_price(), b.no_price()),
        HedgeLeg::NoAYesB => (a.no_price(), b.yes_price()),
    };
    format!(
        "{} \"{}\" vs {} \"{}\": buy {} at {} + {} = {} for a $1 payout ({} bps edge)",
        a.platform().display_name(),
        a.question(),
        b.platform().display_name(),
        b.question(),
        edge.leg.describe(a, b),
        price_a,
        price_b,
        edge.combined_cost,
        edge.edge_bps,
    )
}

/// Baseline risks followed by the ones this particular pair triggers.
fn assess_risks(candidate: &MatchCandidate, edge: &Edge) -> Vec<Risk> {
    let a = candidate.market_a();
    let b = candidate.market_b();
    let mut risks = Risk::BASELINE.to_vec();

    let delta = a.resolution_delta(b);
    if delta > drift_tolerance() {
        risks.push(Risk::ResolutionTimeDrift {
            minutes: delta.num_minutes(),
        });
    }
    for market in [a, b] {
        if market.settlement_description().is_none() {
            risks.push(Risk::MissingSettlementText {
                platform: market.platform(),
            });
        }
    }
    if candidate.confidence() < REVIEW_CONFIDENCE {
        risks.push(Risk::LowConfidence {
            confidence: candidate.confidence(),
        });
    }
    if edge.edge_bps > SUSPICIOUS_EDGE_BPS {
        risks.push(Risk::SuspiciousEdge {
            edge_bps: edge.edge_bps,
        });
    }
    risks
}
