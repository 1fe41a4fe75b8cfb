use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use regex::{Captures, Regex};
use crate::errors::AnalyzerError;
use super::catalog::{ALERT_TEMPLATE, STABLE_TEMPLATE};
use tracing::debug;

/// Values substituted into a template body.
#[derive(Debug, Clone, Default)]
pub struct PromptVariables {
    pub data: String,
    pub verdict: String,
    pub action: String,
    pub accuracy: String,
    pub impact_rules: Option<String>,
}

/// Resolves template bodies by name. Files in the templates directory
/// (`<name>.txt`, with `@include(path)` directives) take precedence over
/// the built-in bodies.
#[derive(Debug, Clone, Default)]
pub struct PromptLoader {
    templates_dir: Option<PathBuf>,
}

const MAX_INCLUDE_DEPTH: u8 = 5;

static INCLUDE_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@include\(([^)]+)\)").expect("include pattern is valid"));

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Z_]+)\}\}").expect("placeholder pattern is valid"));

impl PromptLoader {
    pub fn new(templates_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = &templates_dir {
            debug!(dir = %dir.display(), "PromptLoader using template overrides");
        }
        Self { templates_dir }
    }

    /// Load a template by name (without .txt extension).
    pub fn load(&self, name: &str) -> Result<String, AnalyzerError> {
        if let Some(dir) = &self.templates_dir {
            let file_path = dir.join(format!("{}.txt", name));
            if file_path.exists() {
                let content = std::fs::read_to_string(&file_path).map_err(|e| {
                    AnalyzerError::Prompt(format!(
                        "Failed to read template {}: {}",
                        file_path.display(),
                        e
                    ))
                })?;
                return self.process_includes(dir, &content, 0);
            }
        }
        builtin_template(name)
            .map(str::to_string)
            .ok_or_else(|| AnalyzerError::Prompt(format!("Unknown template: {}", name)))
    }

    /// Replace {{VARIABLE}} placeholders in a single pass, so substituted
    /// values are never scanned again. Unknown placeholders are kept as-is and
    /// a missing optional value becomes an empty string.
    pub fn interpolate(&self, template: &str, vars: &PromptVariables) -> String {
        PLACEHOLDER
            .replace_all(template, |caps: &Captures<'_>| match &caps[1] {
                "DATA" => vars.data.clone(),
                "VERDICT" => vars.verdict.clone(),
                "ACTION" => vars.action.clone(),
                "ACCURACY" => vars.accuracy.clone(),
                "IMPACT_RULES" => vars.impact_rules.clone().unwrap_or_default(),
                _ => caps[0].to_string(),
            })
            .into_owned()
    }

    fn process_includes(&self, dir: &Path, content: &str, depth: u8) -> Result<String, AnalyzerError> {
        if depth >= MAX_INCLUDE_DEPTH {
            return Err(AnalyzerError::Prompt(format!(
                "Include depth limit ({}) exceeded, possible circular include",
                MAX_INCLUDE_DEPTH
            )));
        }

        let mut result = content.to_string();
        let matches: Vec<(String, String)> = INCLUDE_DIRECTIVE
            .captures_iter(content)
            .map(|cap| (cap[0].to_string(), cap[1].to_string()))
            .collect();

        for (full_match, include_path) in matches {
            let file_path = dir.join(&include_path);
            let included = std::fs::read_to_string(&file_path).map_err(|e| {
                AnalyzerError::Prompt(format!(
                    "Failed to read included file {} (referenced as @include({})): {}",
                    file_path.display(),
                    include_path,
                    e
                ))
            })?;
            let processed = self.process_includes(dir, &included, depth + 1)?;
            result = result.replace(&full_match, &processed);
        }

        Ok(result)
    }
}

fn builtin_template(name: &str) -> Option<&'static str> {
    match name {
        "stable" => Some(STABLE_TEMPLATE),
        "alert" => Some(ALERT_TEMPLATE),
        _ => None,
    }
}
