//! Market data source port.
//!
//! Each platform adapter turns its API payload into [`MarketListing`]
//! records. Listings are deliberately loose: every field the normalizer
//! validates is optional or textual here, so malformed upstream data
//! surfaces as a typed normalization failure rather than a decode error
//! that would sink the whole page.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::platform::Platform;
use crate::error::Result;

/// A platform market as received, before validation.
#[derive(Debug, Clone)]
pub struct MarketListing {
    /// Platform the listing came from.
    pub platform: Platform,
    /// Platform-local identifier (ticker or condition id).
    pub id: String,
    /// Market question or title.
    pub question: Option<String>,
    /// Resolution timestamp as sent by the platform (RFC 3339 or a date).
    pub resolution_time: Option<String>,
    /// Outcome names with their quoted prices.
    pub outcomes: Vec<OutcomeQuote>,
    /// Settlement rules text.
    pub settlement_description: Option<String>,
    /// Platform grouping hint such as an event or series ticker.
    pub entity_hint: Option<String>,
    /// Whether the platform reports the market open for trading.
    pub active: bool,
}

/// A single outcome and its quote.
#[derive(Debug, Clone)]
pub struct OutcomeQuote {
    /// Outcome name, e.g. "Yes" or "No".
    pub name: String,
    /// Price as a fraction of the payout, if the platform quoted one.
    pub price: Option<Decimal>,
}

impl OutcomeQuote {
    pub fn new(name: impl Into<String>, price: Option<Decimal>) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

impl MarketListing {
    /// Check if this is a binary (YES/NO) market.
    #[must_use]
    pub fn is_binary(&self) -> bool {
        self.outcomes.len() == 2
    }

    /// Find an outcome by case-insensitive name.
    #[must_use]
    pub fn outcome(&self, name: &str) -> Option<&OutcomeQuote> {
        self.outcomes
            .iter()
            .find(|o| o.name.trim().eq_ignore_ascii_case(name))
    }
}

/// Fetches active market listings from one platform.
///
/// # Errors
///
/// Implementations report failures as
/// [`PlatformError`](crate::error::PlatformError) variants wrapped in the
/// crate error: authentication, rate limiting, network failure, timeout, or
/// the not-implemented signal for a disabled integration.
#[async_trait]
pub trait MarketSource: Send + Sync {
    /// The platform this source reads from.
    fn platform(&self) -> Platform;

    /// Fetch all currently active listings.
    async fn fetch_active_markets(&self) -> Result<Vec<MarketListing>>;
}
