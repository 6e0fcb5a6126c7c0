//! Kalshi integration (trade API v2 market listing).

pub mod client;
pub mod dto;
pub mod settings;

pub use client::KalshiSource;
pub use settings::KalshiConfig;
