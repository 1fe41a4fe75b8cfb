use std::sync::Arc;
use crate::analysis::{classify, ClassificationPolicy};
use crate::config::AnalyzerConfig;
use crate::errors::AnalyzerError;
use crate::extract::{parse_log_failed_details, parse_log_stats};
use crate::llm::{LLMProvider, SamplingConfig};
use crate::models::{AnalysisOutcome, Classification, FailedTestRecord, RawStats, TestRunStats};
use crate::prompts::{AnalysisPrompt, PromptBuilder};
use crate::reporting::assemble_report;
use tracing::{info, warn};

/// Everything computed before the generator is called.
#[derive(Debug)]
pub struct PreparedAnalysis {
    pub stats: TestRunStats,
    pub classification: Classification,
    pub failures: Vec<FailedTestRecord>,
    pub prompt: AnalysisPrompt,
}

/// Entry point of the analysis pipeline. The generator handle is created
/// once by the caller and injected; `None` means it failed to come up.
pub struct LogAnalyzer {
    generator: Option<Arc<dyn LLMProvider>>,
    policy: ClassificationPolicy,
    prompts: PromptBuilder,
    sampling: SamplingConfig,
}

impl LogAnalyzer {
    pub fn new(generator: Option<Arc<dyn LLMProvider>>) -> Self {
        Self {
            generator,
            policy: ClassificationPolicy::default(),
            prompts: PromptBuilder::default(),
            sampling: SamplingConfig::default(),
        }
    }

    pub fn from_config(config: &AnalyzerConfig, generator: Option<Arc<dyn LLMProvider>>) -> Self {
        Self {
            generator,
            policy: config.policy(),
            prompts: config.prompt_builder(),
            sampling: config.sampling(),
        }
    }

    pub fn with_policy(mut self, policy: ClassificationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_prompt_builder(mut self, prompts: PromptBuilder) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    /// Analyze a raw log.html document. Never fails: every terminal
    /// condition comes back as the outcome's report string.
    pub async fn analyze_log(&self, html: &str) -> AnalysisOutcome {
        let Some(raw) = parse_log_stats(html) else {
            let e = AnalyzerError::NoStatistics;
            warn!(error = %e, "Analysis halted");
            return AnalysisOutcome::new(Vec::new()).halt(e.user_message(), e.to_string());
        };
        info!("Overall statistics extracted");

        let failures = parse_log_failed_details(html);
        if !failures.is_empty() {
            info!(count = failures.len(), "Failure details extracted");
        }

        self.analyze_stats(&raw, failures).await
    }

    /// Analyze already-extracted statistics and failure records.
    pub async fn analyze_stats(&self, raw: &RawStats, failures: Vec<FailedTestRecord>) -> AnalysisOutcome {
        let mut outcome = AnalysisOutcome::new(Vec::new());
        match self.run(raw, failures, &mut outcome).await {
            Ok(()) => outcome,
            Err(e) => {
                warn!(error = %e, "Analysis halted");
                outcome.halt(e.user_message(), e.to_string())
            }
        }
    }

    async fn run(
        &self,
        raw: &RawStats,
        failures: Vec<FailedTestRecord>,
        outcome: &mut AnalysisOutcome,
    ) -> Result<(), AnalyzerError> {
        let generator = self.generator.as_deref().ok_or(AnalyzerError::GeneratorUnavailable)?;

        let prepared = self.prepare_stats(raw, failures)?;
        outcome.stats = Some(prepared.stats);
        outcome.verdict = Some(prepared.classification.category);
        outcome.accuracy = Some(prepared.classification.accuracy);
        outcome.failures = prepared.failures;

        let generated = assemble_report(
            generator,
            prepared.prompt,
            &prepared.stats,
            &prepared.classification,
            &self.sampling,
        )
        .await?;

        outcome.report = generated.report;
        outcome.generation_ms = Some(generated.generation_ms);
        Ok(())
    }

    /// Extract, classify and build the prompt without calling the generator.
    pub fn prepare(&self, html: &str) -> Result<PreparedAnalysis, AnalyzerError> {
        let raw = parse_log_stats(html).ok_or(AnalyzerError::NoStatistics)?;
        self.prepare_stats(&raw, parse_log_failed_details(html))
    }

    fn prepare_stats(
        &self,
        raw: &RawStats,
        failures: Vec<FailedTestRecord>,
    ) -> Result<PreparedAnalysis, AnalyzerError> {
        let stats = raw.parse()?;
        let classification = classify(&stats, &failures, &self.policy);
        info!(
            verdict = %classification.category,
            accuracy = classification.accuracy,
            critical_failed = classification.critical_failed,
            "Build classified"
        );
        let prompt = self.prompts.build(&stats, &classification, &failures)?;
        Ok(PreparedAnalysis { stats, classification, failures, prompt })
    }
}
