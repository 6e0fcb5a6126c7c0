//! [`SemanticMatcher`](crate::port::outbound::matcher::SemanticMatcher)
//! implementations.
//!
//! - [`LlmMatcher`]: asks a language model which markets are the same event
//! - [`KeywordMatcher`]: offline token-overlap heuristic

pub mod keyword;
pub mod llm;

pub use keyword::KeywordMatcher;
pub use llm::LlmMatcher;
