//! Platform-agnostic domain types and pricing logic.
//!
//! Nothing in this module performs I/O. Types validate their invariants at
//! construction and expose read-only accessors afterwards.

pub mod edge;
pub mod error;
pub mod id;
pub mod market;
pub mod matching;
pub mod money;
pub mod opportunity;
pub mod platform;
pub mod risk;

pub use edge::{Edge, HedgeLeg};
pub use error::DomainError;
pub use id::MarketId;
pub use market::{NormalizedMarket, NormalizedMarketBuilder};
pub use matching::MatchCandidate;
pub use money::{BasisPoints, Price};
pub use opportunity::ArbitrageOpportunity;
pub use platform::Platform;
pub use risk::Risk;
