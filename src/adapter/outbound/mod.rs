//! Outbound adapters (driven side).

pub mod disabled;
pub mod http;
pub mod kalshi;
pub mod llm;
pub mod matcher;
pub mod polymarket;
