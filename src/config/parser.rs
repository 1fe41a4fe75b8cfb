use std::path::Path;
use crate::errors::AnalyzerError;
use crate::llm::catalog;
use super::types::AnalyzerConfig;
use super::schema::CONFIG_SCHEMA;
use crate::prompts::DEFAULT_MAX_FAILURES;
use tracing::warn;

pub async fn parse_config(path: &Path) -> Result<AnalyzerConfig, AnalyzerError> {
    if !path.exists() {
        return Err(AnalyzerError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(AnalyzerError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

pub fn parse_config_str(content: &str) -> Result<AnalyzerConfig, AnalyzerError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
    if yaml.is_null() {
        return Ok(AnalyzerConfig::default());
    }

    // JSON Schema validation
    validate_schema(&yaml)?;

    // Parse into typed config
    let config: AnalyzerConfig = serde_yaml::from_value(yaml)?;

    validate_semantics(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema. Violations are reported as
/// warnings; the typed parse and semantic checks are authoritative.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), AnalyzerError> {
    let json_value = serde_json::to_value(yaml)
        .map_err(|e| AnalyzerError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| AnalyzerError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        for e in errors {
            warn!(validation_error = %format!("{} at {}", e, e.instance_path), "Config schema warning");
        }
    }

    Ok(())
}

fn validate_semantics(config: &AnalyzerConfig) -> Result<(), AnalyzerError> {
    if let Some(provider) = config.llm.as_ref().and_then(|l| l.provider.as_deref()) {
        if catalog::get_provider(provider).is_none() {
            return Err(AnalyzerError::Config(format!(
                "Unknown LLM provider '{}' (expected one of: {})",
                provider,
                catalog::provider_ids().join(", ")
            )));
        }
    }

    if let Some(sampling) = &config.sampling {
        if sampling.max_tokens == 0 {
            return Err(AnalyzerError::Config("sampling.max_tokens must be at least 1".into()));
        }
        if sampling.stop.is_empty() {
            warn!("No stop sequence configured; generation runs until max_tokens");
        }
    }

    if let Some(classification) = &config.classification {
        if let Some(threshold) = classification.accuracy_threshold {
            if !(0.0..=100.0).contains(&threshold) {
                return Err(AnalyzerError::Config(format!(
                    "classification.accuracy_threshold must be within 0..=100, got {}",
                    threshold
                )));
            }
        }
        if let Some(names) = &classification.critical_tests {
            if names.iter().any(|n| n.trim().is_empty()) {
                return Err(AnalyzerError::Config(
                    "classification.critical_tests must not contain empty names".into(),
                ));
            }
        }
    }

    if let Some(prompt) = &config.prompt {
        if let Some(max) = prompt.max_failures {
            if max == 0 || max > DEFAULT_MAX_FAILURES {
                return Err(AnalyzerError::Config(format!(
                    "prompt.max_failures must be within 1..={}, got {}",
                    DEFAULT_MAX_FAILURES, max
                )));
            }
        }
        if let Some(rules) = &prompt.impact_rules {
            for rule in rules {
                if rule.substrings.is_empty() || rule.substrings.iter().any(|s| s.trim().is_empty()) {
                    return Err(AnalyzerError::Config(format!(
                        "Impact rule '{}' has missing or empty substrings",
                        rule.explanation
                    )));
                }
            }
        }
        if let Some(dir) = &prompt.templates_dir {
            if !Path::new(dir).is_dir() {
                warn!(dir = %dir, "Template directory not found, built-in templates will be used");
            }
        }
    }

    Ok(())
}
