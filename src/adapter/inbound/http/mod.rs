//! HTTP reporting endpoint.
//!
//! Exposes the opportunity report as JSON at `GET /api/opportunities`.
//! Every request triggers a fresh pipeline run.

pub mod handlers;
pub mod server;

pub use server::{router, serve, serve_listener, shutdown_signal};
