//! Monetary types for price and edge representation.

use rust_decimal::{Decimal, RoundingStrategy};

/// Price represented as a Decimal fraction of a $1 payout.
pub type Price = Decimal;

/// Signed edge in basis points.
pub type BasisPoints = Decimal;

/// Basis points in one unit of payout.
const BPS_PER_UNIT: i64 = 10_000;

/// Convert a payout fraction to basis points, rounded to one decimal place.
///
/// Midpoints round away from zero so positive and negative edges of the
/// same magnitude stay symmetric.
#[must_use]
pub fn to_bps(fraction: Decimal) -> BasisPoints {
    (fraction * Decimal::from(BPS_PER_UNIT))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// True if the price is a valid fraction in `[0, 1]`.
#[must_use]
pub fn is_unit_interval(price: Price) -> bool {
    price >= Decimal::ZERO && price <= Decimal::ONE
}
