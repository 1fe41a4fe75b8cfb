pub mod types;

pub use types::{AnalyzerError, ExtractionError};
