pub mod analysis;
pub mod config;
pub mod errors;
pub mod extract;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod reporting;
pub mod utils;

#[cfg(feature = "cli")]
pub mod cli;

pub use errors::{AnalyzerError, ExtractionError};
pub use pipeline::LogAnalyzer;
