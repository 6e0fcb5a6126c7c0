//! Market normalization: platform listings to [`NormalizedMarket`].
//!
//! Pure mapping. Malformed listings produce a [`DomainError`]; batch
//! normalization drops them with a warning and keeps going.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::{debug, warn};

use super::entity;
use crate::domain::error::DomainError;
use crate::domain::id::MarketId;
use crate::domain::market::NormalizedMarket;
use crate::domain::money::Price;
use crate::port::outbound::source::{MarketListing, OutcomeQuote};

/// Result of normalizing a batch of listings.
#[derive(Debug, Default)]
pub struct Normalized {
    pub markets: Vec<NormalizedMarket>,
    /// Listings dropped as malformed.
    pub malformed: usize,
}

/// Normalize a single listing.
///
/// # Errors
///
/// Returns a [`DomainError`] describing the first malformed or missing
/// field.
pub fn normalize(listing: &MarketListing) -> Result<NormalizedMarket, DomainError> {
    let market_id = MarketId::try_new(listing.id.as_str())?;

    let resolution_time = listing
        .resolution_time
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or(DomainError::MissingField {
            field: "resolution_time",
        })
        .and_then(parse_timestamp)?;

    let yes = side_price(listing, "yes", 0)
        .ok_or(DomainError::MissingField { field: "yes_price" })?;
    let no = side_price(listing, "no", 1)
        .ok_or(DomainError::MissingField { field: "no_price" })?;

    let question = listing.question.clone().unwrap_or_default();
    let underlying_entity = entity::recognize(&question, listing.entity_hint.as_deref());

    NormalizedMarket::builder(listing.platform, market_id)
        .question(question)
        .resolution_time(resolution_time)
        .prices(yes, no)
        .settlement_description(listing.settlement_description.clone())
        .underlying_entity(underlying_entity)
        .active(listing.active)
        .outcome_count(listing.outcomes.len())
        .build()
}

/// Normalize a batch, dropping malformed listings.
#[must_use]
pub fn normalize_all(listings: &[MarketListing]) -> Normalized {
    let mut out = Normalized::default();
    for listing in listings {
        match normalize(listing) {
            Ok(market) => out.markets.push(market),
            Err(error) => {
                warn!(
                    platform = %listing.platform,
                    market_id = %listing.id,
                    error = %error,
                    "Dropping malformed market"
                );
                out.malformed += 1;
            }
        }
    }
    debug!(
        normalized = out.markets.len(),
        malformed = out.malformed,
        "Normalized listings"
    );
    out
}

/// Price for one side: the outcome named `name`, or the outcome at
/// `position` when the listing uses other labels.
///
/// Unlabelled listings with more than two outcomes still normalize; the
/// comparability filter excludes them as non-binary.
fn side_price(listing: &MarketListing, name: &str, position: usize) -> Option<Price> {
    let quote: Option<&OutcomeQuote> = listing.outcome(name).or_else(|| {
        let labelled = listing.outcome("yes").is_some() || listing.outcome("no").is_some();
        if labelled {
            None
        } else {
            listing.outcomes.get(position)
        }
    });
    quote.and_then(|q| q.price)
}

/// Parse an RFC 3339 timestamp. A bare date is taken as midnight UTC and a
/// timestamp without offset as UTC.
///
/// # Errors
///
/// Returns [`DomainError::MalformedTimestamp`] when no format matches.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc())
            .ok_or_else(|| DomainError::MalformedTimestamp {
                raw: raw.to_string(),
                reason: "invalid time of day".to_string(),
            }),
        Err(err) => Err(DomainError::MalformedTimestamp {
            raw: raw.to_string(),
            reason: err.to_string(),
        }),
    }
}
