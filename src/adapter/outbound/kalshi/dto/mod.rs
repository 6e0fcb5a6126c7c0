//! Kalshi data transfer objects.

pub mod response;
