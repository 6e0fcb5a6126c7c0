//! Combined-cost edge calculation.
//!
//! A binary market pays $1 to exactly one of YES or NO. Holding YES on one
//! venue and NO on the other for the same event therefore pays $1 no matter
//! the outcome, and the edge is what is left of that dollar after paying for
//! the two legs.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::market::NormalizedMarket;
use super::matching::MatchCandidate;
use super::money::{to_bps, BasisPoints, Price};

/// Which pair of positions forms the cheaper full-coverage hedge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HedgeLeg {
    /// YES on market A, NO on market B.
    YesANoB,
    /// NO on market A, YES on market B.
    NoAYesB,
}

impl HedgeLeg {
    /// Human-readable legs, e.g. "YES on Kalshi + NO on Polymarket".
    #[must_use]
    pub fn describe(self, a: &NormalizedMarket, b: &NormalizedMarket) -> String {
        let (a_side, b_side) = match self {
            Self::YesANoB => ("YES", "NO"),
            Self::NoAYesB => ("NO", "YES"),
        };
        format!(
            "{a_side} on {} + {b_side} on {}",
            a.platform().display_name(),
            b.platform().display_name()
        )
    }
}

impl fmt::Display for HedgeLeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::YesANoB => write!(f, "YES(A)+NO(B)"),
            Self::NoAYesB => write!(f, "NO(A)+YES(B)"),
        }
    }
}

/// Result of pricing a candidate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub leg: HedgeLeg,
    #[serde(with = "rust_decimal::serde::float")]
    pub combined_cost: Price,
    #[serde(with = "rust_decimal::serde::float")]
    pub edge_bps: BasisPoints,
}

impl Edge {
    /// Price the cheapest full-coverage hedge between two markets.
    ///
    /// Equal leg costs resolve to [`HedgeLeg::YesANoB`].
    #[must_use]
    pub fn between(a: &NormalizedMarket, b: &NormalizedMarket) -> Self {
        let yes_a_no_b = a.yes_price() + b.no_price();
        let no_a_yes_b = a.no_price() + b.yes_price();

        let (leg, combined_cost) = if no_a_yes_b < yes_a_no_b {
            (HedgeLeg::NoAYesB, no_a_yes_b)
        } else {
            (HedgeLeg::YesANoB, yes_a_no_b)
        };

        Self {
            leg,
            combined_cost,
            edge_bps: to_bps(Decimal::ONE - combined_cost),
        }
    }

    /// Price a match candidate.
    #[must_use]
    pub fn calculate(candidate: &MatchCandidate) -> Self {
        Self::between(candidate.market_a(), candidate.market_b())
    }

    /// An opportunity exists only when the hedge costs strictly less than
    /// the guaranteed payout.
    #[must_use]
    pub fn is_opportunity(&self) -> bool {
        self.combined_cost < Decimal::ONE
    }
}
