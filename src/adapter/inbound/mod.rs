//! Driving adapters: the CLI and the HTTP reporting endpoint.

pub mod cli;
pub mod http;
