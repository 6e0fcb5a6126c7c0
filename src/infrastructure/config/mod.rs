//! Infrastructure configuration modules.

pub mod llm;
pub mod logging;
pub mod matching;
pub mod server;
pub mod settings;
pub mod thresholds;

pub use settings::Config;
