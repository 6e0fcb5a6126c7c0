//! Prediction market platforms compared by the pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A market venue.
///
/// Kalshi is treated as platform "A" and Polymarket as platform "B"
/// throughout reports, but every pricing computation is symmetric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Kalshi,
    Polymarket,
}

impl Platform {
    /// Both platforms in A, B order.
    pub const ALL: [Self; 2] = [Self::Kalshi, Self::Polymarket];

    /// Lowercase identifier used in config keys, logs and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kalshi => "kalshi",
            Self::Polymarket => "polymarket",
        }
    }

    /// Human-facing name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Kalshi => "Kalshi",
            Self::Polymarket => "Polymarket",
        }
    }

    /// The other platform.
    #[must_use]
    pub const fn counterpart(self) -> Self {
        match self {
            Self::Kalshi => Self::Polymarket,
            Self::Polymarket => Self::Kalshi,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counterpart_is_an_involution() {
        for platform in Platform::ALL {
            assert_ne!(platform.counterpart(), platform);
            assert_eq!(platform.counterpart().counterpart(), platform);
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(
            serde_json::to_string(&Platform::Polymarket).unwrap(),
            "\"polymarket\""
        );
        let parsed: Platform = serde_json::from_str("\"kalshi\"").unwrap();
        assert_eq!(parsed, Platform::Kalshi);
    }
}
