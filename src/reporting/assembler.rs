use std::time::Instant;
use crate::errors::AnalyzerError;
use crate::llm::{LLMProvider, SamplingConfig};
use crate::models::{Classification, TestRunStats};
use crate::prompts::AnalysisPrompt;
use crate::reporting::formatter::format_summary_header;
use crate::utils::formatting::format_duration;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub report: String,
    pub generation_ms: u64,
}

/// Run the generator on the prompt and put the computed summary header in
/// front of its trimmed output.
pub async fn assemble_report(
    llm: &dyn LLMProvider,
    prompt: AnalysisPrompt,
    stats: &TestRunStats,
    classification: &Classification,
    sampling: &SamplingConfig,
) -> Result<GeneratedReport, AnalyzerError> {
    info!(
        verdict = %classification.category,
        provider = llm.provider_name(),
        model = llm.model_name(),
        "Generating narrative"
    );

    let started = Instant::now();
    let result = llm.generate(prompt.as_str(), sampling).await;
    let generation_ms = started.elapsed().as_millis() as u64;

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, elapsed = %format_duration(generation_ms), "Narrative generation failed");
            return Err(match e {
                AnalyzerError::Generation(_) => e,
                other => AnalyzerError::Generation(other.to_string()),
            });
        }
    };

    info!(
        elapsed = %format_duration(generation_ms),
        output_tokens = response.output_tokens,
        "Narrative generated"
    );

    let mut report = format_summary_header(stats, classification.accuracy);
    report.push_str(response.content.trim());
    Ok(GeneratedReport { report, generation_ms })
}
