pub mod analyzer;

pub use analyzer::{LogAnalyzer, PreparedAnalysis};
