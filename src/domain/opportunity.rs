//! Assembled arbitrage opportunity.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::edge::{Edge, HedgeLeg};
use super::error::DomainError;
use super::market::NormalizedMarket;
use super::matching::MatchCandidate;
use super::money::{BasisPoints, Price};
use super::risk::Risk;

/// A matched pair whose cheapest hedge costs less than the payout.
///
/// Immutable once assembled. `edge_bps` is signed with one fractional digit
/// and `risks` is ordered and never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArbitrageOpportunity {
    market_a: NormalizedMarket,
    market_b: NormalizedMarket,
    #[serde(with = "rust_decimal::serde::float")]
    edge_bps: BasisPoints,
    description: String,
    risks: Vec<Risk>,
    confidence: f64,
    rationale: String,
    leg: HedgeLeg,
    #[serde(with = "rust_decimal::serde::float")]
    combined_cost: Price,
    detected_at: DateTime<Utc>,
}

impl ArbitrageOpportunity {
    /// Assemble an opportunity from a candidate and its priced edge.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyRisks`] when no risk is supplied.
    pub fn try_new(
        candidate: MatchCandidate,
        edge: Edge,
        description: impl Into<String>,
        risks: Vec<Risk>,
        detected_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if risks.is_empty() {
            return Err(DomainError::EmptyRisks);
        }
        let confidence = candidate.confidence();
        let rationale = candidate.rationale().to_string();
        let (market_a, market_b) = candidate.into_markets();
        Ok(Self {
            market_a,
            market_b,
            edge_bps: edge.edge_bps,
            description: description.into(),
            risks,
            confidence,
            rationale,
            leg: edge.leg,
            combined_cost: edge.combined_cost,
            detected_at,
        })
    }

    #[must_use]
    pub const fn market_a(&self) -> &NormalizedMarket {
        &self.market_a
    }

    #[must_use]
    pub const fn market_b(&self) -> &NormalizedMarket {
        &self.market_b
    }

    #[must_use]
    pub const fn edge_bps(&self) -> BasisPoints {
        self.edge_bps
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn risks(&self) -> &[Risk] {
        &self.risks
    }

    #[must_use]
    pub const fn confidence(&self) -> f64 {
        self.confidence
    }

    #[must_use]
    pub fn rationale(&self) -> &str {
        &self.rationale
    }

    #[must_use]
    pub const fn leg(&self) -> HedgeLeg {
        self.leg
    }

    #[must_use]
    pub const fn combined_cost(&self) -> Price {
        self.combined_cost
    }

    #[must_use]
    pub const fn detected_at(&self) -> DateTime<Utc> {
        self.detected_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::MarketId;
    use crate::domain::platform::Platform;
    use rust_decimal_macros::dec;

    fn candidate() -> MatchCandidate {
        let build = |platform: Platform, yes, no| {
            NormalizedMarket::builder(platform, MarketId::new(platform.as_str()))
                .question("Will it rain?")
                .resolution_time(Utc::now())
                .prices(yes, no)
                .build()
                .unwrap()
        };
        MatchCandidate::try_new(
            build(Platform::Kalshi, dec!(0.40), dec!(0.62)),
            build(Platform::Polymarket, dec!(0.50), dec!(0.55)),
            0.95,
            "identical wording",
        )
        .unwrap()
    }

    #[test]
    fn rejects_empty_risks() {
        let c = candidate();
        let edge = Edge::calculate(&c);
        let err = ArbitrageOpportunity::try_new(c, edge, "d", Vec::new(), Utc::now()).unwrap_err();
        assert_eq!(err, DomainError::EmptyRisks);
    }

    #[test]
    fn carries_candidate_and_edge() {
        let c = candidate();
        let edge = Edge::calculate(&c);
        let opp = ArbitrageOpportunity::try_new(
            c,
            edge,
            "desc",
            Risk::BASELINE.to_vec(),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(opp.edge_bps(), dec!(500.0));
        assert_eq!(opp.leg(), HedgeLeg::YesANoB);
        assert_eq!(opp.confidence(), 0.95);
        assert_eq!(opp.rationale(), "identical wording");
        assert_eq!(opp.risks().len(), 4);
    }

    #[test]
    fn serializes_for_reporting() {
        let c = candidate();
        let edge = Edge::calculate(&c);
        let opp =
            ArbitrageOpportunity::try_new(c, edge, "desc", Risk::BASELINE.to_vec(), Utc::now())
                .unwrap();
        let json = serde_json::to_value(&opp).unwrap();
        assert_eq!(json["edge_bps"], 500.0);
        assert_eq!(json["leg"], "yes_a_no_b");
        assert_eq!(json["market_a"]["platform"], "kalshi");
        assert_eq!(json["risks"].as_array().unwrap().len(), 4);
    }
}
