use std::path::{Path, PathBuf};
use std::sync::Arc;
use crate::cli::commands::AnalyzeArgs;
use crate::cli::render::render_outcome;
use crate::config::{self, AnalyzerConfig, LLMConfig, PromptConfig};
use crate::errors::AnalyzerError;
use crate::llm::{self, LLMProvider};
use crate::pipeline::LogAnalyzer;
use tracing::{info, warn};

/// Returns whether the analysis produced a report (as opposed to an error string).
pub async fn handle_analyze(args: AnalyzeArgs, quiet: bool) -> Result<bool, AnalyzerError> {
    let log_path = PathBuf::from(&args.log);
    check_log_path(&log_path)?;

    let file_config = match &args.config {
        Some(path) => config::parse_config(&PathBuf::from(path)).await?,
        None => AnalyzerConfig::default(),
    };
    let config = apply_overrides(file_config, &args);

    let bytes = tokio::fs::read(&log_path).await?;
    let html = String::from_utf8(bytes)
        .map_err(|e| AnalyzerError::InvalidInput(format!("{} is not UTF-8: {}", log_path.display(), e)))?;
    info!(path = %log_path.display(), bytes = html.len(), "Analyzing log");

    if args.dry_run {
        let analyzer = LogAnalyzer::from_config(&config, None);
        let prepared = analyzer.prepare(&html)?;
        info!(verdict = %prepared.classification.category, "Dry run, generator not called");
        println!("{}", prepared.prompt);
        return Ok(true);
    }

    let generator = start_generator(&config);
    let analyzer = LogAnalyzer::from_config(&config, generator);
    let outcome = analyzer.analyze_log(&html).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", render_outcome(&outcome, quiet));
    }
    Ok(outcome.is_success())
}

/// The upload form only accepted files named `*log.html`.
fn check_log_path(path: &Path) -> Result<(), AnalyzerError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_lowercase();
    if !name.ends_with("log.html") {
        return Err(AnalyzerError::InvalidInput(format!(
            "Expected a log.html file, got {}",
            path.display()
        )));
    }
    if !path.exists() {
        return Err(AnalyzerError::InvalidInput(format!("File not found: {}", path.display())));
    }
    Ok(())
}

fn apply_overrides(mut config: AnalyzerConfig, args: &AnalyzeArgs) -> AnalyzerConfig {
    let llm = config.llm.get_or_insert_with(LLMConfig::default);
    if let Some(provider) = &args.provider {
        llm.provider = Some(provider.clone());
    }
    if let Some(model) = &args.model {
        llm.model = Some(model.clone());
    }
    if let Some(url) = &args.base_url {
        llm.base_url = Some(url.clone());
    }
    if let Some(dir) = &args.templates_dir {
        config.prompt.get_or_insert_with(PromptConfig::default).templates_dir = Some(dir.clone());
    }
    config
}

/// Bring up the generator once. A backend that cannot be constructed
/// leaves the analyzer without one, which it reports as unavailable.
fn start_generator(config: &AnalyzerConfig) -> Option<Arc<dyn LLMProvider>> {
    let llm_config = config.llm.clone().unwrap_or_default();
    match llm::create_provider(
        config.provider(),
        llm_config.model.as_deref(),
        llm_config.base_url.as_deref(),
    ) {
        Ok(provider) => Some(Arc::from(provider)),
        Err(e) => {
            warn!(error = %e, "Text generator could not be initialized");
            None
        }
    }
}
