//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`source`] - Mock [`MarketSource`](crate::port::outbound::source::MarketSource)
//!   implementation: `ScriptedSource`, which can also fail on demand.
//! - [`matcher`] - Mock matchers: `ScriptedMatcher`, `FailingMatcher`.
//! - [`domain`] - Builders for listings and normalized markets.
//! - [`config`] - Canonical test configurations with zero-delay retries.

pub mod config;
pub mod domain;
pub mod matcher;
pub mod source;
