//! Opportunity thresholds.

use rust_decimal::Decimal;
use serde::Deserialize;

/// `[thresholds]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdsConfig {
    /// Opportunities must exceed this edge, in basis points.
    #[serde(default = "default_min_edge_bps")]
    pub min_edge_bps: Decimal,
}

fn default_min_edge_bps() -> Decimal {
    Decimal::from(50)
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            min_edge_bps: default_min_edge_bps(),
        }
    }
}
