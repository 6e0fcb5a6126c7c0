//! Application layer: the detection pipeline and the services around it.
//!
//! - [`normalize`] and [`filter`] prepare platform listings
//! - [`matching`] pairs markets across platforms through the matcher port
//! - [`assembler`] prices pairs and annotates risks
//! - [`pipeline`] sequences the stages
//! - [`report`] exposes runs to inbound adapters
//! - [`retry`] is the shared network retry envelope

pub mod assembler;
pub mod entity;
pub mod filter;
pub mod matching;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod retry;

pub use assembler::OpportunityAssembler;
pub use matching::{MatchOutcome, MatchService, MatchSettings};
pub use pipeline::{Pipeline, PipelineConfig, PipelineOutcome};
pub use report::OpportunityService;
pub use retry::RetryPolicy;
