//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors and builders when a
//! domain invariant is violated. Market-level variants are what the
//! normalizer reports as malformed market data.
//!
//! # Examples
//!
//! ```
//! use crossedge::domain::error::DomainError;
//! use crossedge::domain::id::MarketId;
//!
//! let result = MarketId::try_new("   ");
//! assert!(matches!(result, Err(DomainError::MalformedIdentifier { .. })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use super::platform::Platform;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Identifier is blank or contains whitespace.
    #[error("malformed market identifier: {raw:?}")]
    MalformedIdentifier {
        /// The identifier as received.
        raw: String,
    },

    /// A field required to compare markets is absent.
    #[error("missing required field: {field}")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// Resolution time could not be parsed.
    #[error("malformed timestamp {raw:?}: {reason}")]
    MalformedTimestamp {
        /// The timestamp text as received.
        raw: String,
        /// Parser message.
        reason: String,
    },

    /// Prices are fractions of the payout.
    #[error("{field} {value} is outside [0, 1]")]
    PriceOutOfRange {
        /// Which price.
        field: &'static str,
        /// The offending value.
        value: Decimal,
    },

    /// Match confidence is a probability.
    #[error("confidence {value} is outside [0, 1]")]
    ConfidenceOutOfRange {
        /// The offending value.
        value: f64,
    },

    /// A candidate must pair markets from different venues.
    #[error("candidate markets must come from different platforms (both {platform})")]
    SamePlatform {
        /// The shared platform.
        platform: Platform,
    },

    /// Opportunities always carry at least one risk.
    #[error("risk list cannot be empty")]
    EmptyRisks,
}
