use async_trait::async_trait;
use crate::errors::AnalyzerError;
use super::types::{LLMResponse, SamplingConfig};

/// A text-generation backend. Constructed once at startup and shared
/// read-only by every analysis request.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Raw completion of an already turn-formatted prompt.
    async fn generate(
        &self,
        prompt: &str,
        sampling: &SamplingConfig,
    ) -> Result<LLMResponse, AnalyzerError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;

    /// Model identifier
    fn model_name(&self) -> &str;
}
