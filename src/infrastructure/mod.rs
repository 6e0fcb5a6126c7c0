//! Infrastructure layer.
//!
//! Configuration loading and the composition root that wires adapters into
//! the application pipeline.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading and validation
//! - [`factory`] - Component factory functions

pub mod config;
pub mod factory;
