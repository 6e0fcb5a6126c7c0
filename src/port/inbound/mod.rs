//! Inbound (driving) ports consumed by inbound adapters.
//!
//! - [`report`]: opportunity queries served by the CLI and HTTP endpoint

pub mod report;
