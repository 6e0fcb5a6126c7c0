//! Builders for listings and markets used across tests.
//!
//! All timestamps are relative to [`now`], a fixed instant, so pipeline
//! tests can pass it to `run_at` and stay deterministic.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::domain::id::MarketId;
use crate::domain::market::NormalizedMarket;
use crate::domain::platform::Platform;
use crate::port::outbound::source::{MarketListing, OutcomeQuote};

/// The fixed "current time" for tests.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// A well-formed active binary listing resolving `days` after [`now`].
pub fn listing(
    platform: Platform,
    id: &str,
    question: &str,
    yes: Decimal,
    no: Decimal,
    days: i64,
) -> MarketListing {
    MarketListing {
        platform,
        id: id.to_string(),
        question: Some(question.to_string()),
        resolution_time: Some((now() + Duration::days(days)).to_rfc3339()),
        outcomes: vec![
            OutcomeQuote::new("Yes", Some(yes)),
            OutcomeQuote::new("No", Some(no)),
        ],
        settlement_description: Some(format!("Resolves per the official source for {id}")),
        entity_hint: None,
        active: true,
    }
}

/// A normalized market resolving `days` after [`now`].
pub fn market(
    platform: Platform,
    id: &str,
    yes: Decimal,
    no: Decimal,
    days: i64,
) -> NormalizedMarket {
    NormalizedMarket::builder(platform, MarketId::new(id))
        .question(format!("Question for {id}"))
        .resolution_time(now() + Duration::days(days))
        .prices(yes, no)
        .build()
        .unwrap_or_else(|err| panic!("invalid test market {id}: {err}"))
}
