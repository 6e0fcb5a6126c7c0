//! Crossedge - cross-venue arbitrage detection for prediction markets.
//!
//! Pulls active binary markets from Kalshi and Polymarket, pairs markets
//! that describe the same real-world event, and reports pairs whose
//! cheapest full-coverage hedge costs less than the $1 payout.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Platform-agnostic types and pricing (no I/O)
//! - [`port`] - Traits the application depends on or exposes
//! - [`application`] - The detection pipeline and reporting service
//! - [`adapter`] - Platform clients, matchers, the CLI, and the HTTP endpoint
//! - [`infrastructure`] - Configuration and wiring
//! - [`error`] - Error types for the crate
//!
//! # Pipeline
//!
//! ```text
//! fetch A + B -> normalize -> filter -> match -> price -> assemble -> sort
//! ```
//!
//! # Example
//!
//! ```no_run
//! use crossedge::infrastructure::config::settings::Config;
//! use crossedge::infrastructure::factory::build_pipeline;
//!
//! # async fn demo() -> crossedge::error::Result<()> {
//! let config = Config::from_env_defaults();
//! let outcome = build_pipeline(&config)?.run().await?;
//! for opportunity in &outcome.opportunities {
//!     println!("{} bps: {}", opportunity.edge_bps(), opportunity.description());
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
