//! Risks attached to every reported opportunity.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use super::platform::Platform;

/// A reason the reported edge may not be realizable.
///
/// Serialized as its display text.
#[derive(Debug, Clone, PartialEq)]
pub enum Risk {
    /// The two venues may word or adjudicate the outcome differently.
    ResolutionCriteria,
    /// Resolution and payout may happen at different times.
    TimingSettlement,
    /// Orders on two venues cannot be filled atomically.
    PlatformExecution,
    /// Quoted prices may not hold for size.
    LiquiditySlippage,
    /// Resolution times differ by at least this many minutes.
    ResolutionTimeDrift { minutes: i64 },
    /// A venue provides no settlement rules to compare.
    MissingSettlementText { platform: Platform },
    /// The matcher was not highly confident in the pairing.
    LowConfidence { confidence: f64 },
    /// The edge is large enough to suggest stale quotes or a false match.
    SuspiciousEdge { edge_bps: Decimal },
}

impl Risk {
    /// Risks that apply to every cross-venue pair, in report order.
    pub const BASELINE: [Self; 4] = [
        Self::ResolutionCriteria,
        Self::TimingSettlement,
        Self::PlatformExecution,
        Self::LiquiditySlippage,
    ];
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResolutionCriteria => f.write_str(
                "Resolution criteria mismatch: the platforms may define or adjudicate the outcome differently",
            ),
            Self::TimingSettlement => f.write_str(
                "Timing/settlement mismatch: markets may resolve or pay out at different times",
            ),
            Self::PlatformExecution => f.write_str(
                "Platform execution risk: legs on separate venues cannot be filled atomically",
            ),
            Self::LiquiditySlippage => f.write_str(
                "Liquidity/slippage risk: quoted prices may not be available at size",
            ),
            Self::ResolutionTimeDrift { minutes } => {
                let hours = minutes / 60;
                let rem = minutes % 60;
                write!(f, "Resolution times differ by {hours}h {rem:02}m")
            }
            Self::MissingSettlementText { platform } => write!(
                f,
                "No settlement rules published on {}; resolution criteria could not be compared",
                platform.display_name()
            ),
            Self::LowConfidence { confidence } => write!(
                f,
                "Match confidence {confidence:.2} is below 0.90; verify the markets describe the same event"
            ),
            Self::SuspiciousEdge { edge_bps } => write!(
                f,
                "Edge of {edge_bps} bps is unusually large; quotes may be stale or the match wrong"
            ),
        }
    }
}

impl Serialize for Risk {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
