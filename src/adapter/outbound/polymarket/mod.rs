//! Polymarket integration (Gamma market discovery).

pub mod client;
pub mod dto;
pub mod settings;

pub use client::PolymarketSource;
pub use settings::PolymarketConfig;
