//! Deterministic comparability filter.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::market::NormalizedMarket;
use crate::domain::money::Price;

/// True if the market can be compared across platforms at `now`.
///
/// Requires an active binary market that has not yet resolved and that has
/// a live quote on both sides. A quote of exactly 0 or 1 means the book is
/// one-sided or the market has effectively settled, so it does not count.
#[must_use]
pub fn is_comparable(market: &NormalizedMarket, now: DateTime<Utc>) -> bool {
    market.is_active()
        && market.is_binary()
        && market.resolution_time() > now
        && is_live_quote(market.yes_price())
        && is_live_quote(market.no_price())
}

/// Keep comparable markets, preserving order.
#[must_use]
pub fn filter_comparable(
    markets: impl IntoIterator<Item = NormalizedMarket>,
    now: DateTime<Utc>,
) -> Vec<NormalizedMarket> {
    markets
        .into_iter()
        .filter(|m| is_comparable(m, now))
        .collect()
}

fn is_live_quote(price: Price) -> bool {
    price > Decimal::ZERO && price < Decimal::ONE
}
