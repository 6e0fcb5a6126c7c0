//! Cross-platform match candidates.

use serde::Serialize;

use super::error::DomainError;
use super::market::NormalizedMarket;

/// A pair of markets, one per platform, believed to resolve on the same event.
///
/// Candidates live for a single pipeline run and are dropped unless their
/// edge clears the configured threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchCandidate {
    market_a: NormalizedMarket,
    market_b: NormalizedMarket,
    confidence: f64,
    rationale: String,
}

impl MatchCandidate {
    /// Pair two markets.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::SamePlatform`] when both markets come from the
    /// same venue and [`DomainError::ConfidenceOutOfRange`] when the
    /// confidence is not a probability.
    pub fn try_new(
        market_a: NormalizedMarket,
        market_b: NormalizedMarket,
        confidence: f64,
        rationale: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if market_a.platform() == market_b.platform() {
            return Err(DomainError::SamePlatform {
                platform: market_a.platform(),
            });
        }
        if !(0.0..=1.0).contains(&confidence) {
            return Err(DomainError::ConfidenceOutOfRange { value: confidence });
        }
        Ok(Self {
            market_a,
            market_b,
            confidence,
            rationale: rationale.into(),
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
    pub const fn confidence(&self) -> f64 {
        self.confidence
    }

    #[must_use]
    pub fn rationale(&self) -> &str {
        &self.rationale
    }

    /// The same pair with the sides exchanged.
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self {
            market_a: self.market_b.clone(),
            market_b: self.market_a.clone(),
            confidence: self.confidence,
            rationale: self.rationale.clone(),
        }
    }

    /// Consume the candidate, returning both markets.
    #[must_use]
    pub fn into_markets(self) -> (NormalizedMarket, NormalizedMarket) {
        (self.market_a, self.market_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::MarketId;
    use crate::domain::platform::Platform;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn market(platform: Platform, id: &str) -> NormalizedMarket {
        NormalizedMarket::builder(platform, MarketId::new(id))
            .question("Will BTC close above 100k?")
            .resolution_time(Utc::now())
            .prices(dec!(0.5), dec!(0.5))
            .build()
            .unwrap()
    }

    #[test]
    fn rejects_same_platform() {
        let err = MatchCandidate::try_new(
            market(Platform::Kalshi, "a"),
            market(Platform::Kalshi, "b"),
            0.9,
            "same",
        )
        .unwrap_err();
        assert_eq!(
            err,
            DomainError::SamePlatform {
                platform: Platform::Kalshi
            }
        );
    }

    #[test]
    fn rejects_confidence_outside_unit_interval() {
        for bad in [-0.1, 1.5, f64::NAN] {
            let result = MatchCandidate::try_new(
                market(Platform::Kalshi, "a"),
                market(Platform::Polymarket, "b"),
                bad,
                "",
            );
            assert!(matches!(
                result,
                Err(DomainError::ConfidenceOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn swapped_exchanges_sides() {
        let candidate = MatchCandidate::try_new(
            market(Platform::Kalshi, "a"),
            market(Platform::Polymarket, "b"),
            0.8,
            "same event",
        )
        .unwrap();
        let swapped = candidate.swapped();
        assert_eq!(swapped.market_a().platform(), Platform::Polymarket);
        assert_eq!(swapped.market_b().market_id().as_str(), "a");
        assert_eq!(swapped.swapped(), candidate);
    }
}
