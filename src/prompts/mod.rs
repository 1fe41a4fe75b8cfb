pub mod builder;
pub mod catalog;
pub mod loader;

pub use builder::{AnalysisPrompt, PromptBuilder, DEFAULT_MAX_FAILURES};
pub use catalog::{ImpactRule, PromptCatalog, VerdictGuidance};
pub use loader::{PromptLoader, PromptVariables};
