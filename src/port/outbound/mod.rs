//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the pipeline's external dependencies: market
//! data platforms, the semantic matcher, and the LLM behind it.

pub mod llm;
pub mod matcher;
pub mod source;
