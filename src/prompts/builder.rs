use std::fmt::Write as _;
use crate::errors::AnalyzerError;
use crate::models::{Classification, FailedTestRecord, TestRunStats, VerdictCategory};
use crate::utils::formatting::format_accuracy;
use super::catalog::PromptCatalog;
use super::loader::{PromptLoader, PromptVariables};
use tracing::debug;

pub const DEFAULT_MAX_FAILURES: usize = 20;

const TURN_START: &str = "<start_of_turn>";
pub const TURN_END: &str = "<end_of_turn>";

/// The complete turn-delimited prompt handed to the text generator.
#[derive(Debug, PartialEq, Eq)]
pub struct AnalysisPrompt(String);

impl AnalysisPrompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for AnalysisPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Assembles the data block and category guidance into a single user turn.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    catalog: PromptCatalog,
    loader: PromptLoader,
    max_failures: usize,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(PromptCatalog::default(), PromptLoader::default(), DEFAULT_MAX_FAILURES)
    }
}

impl PromptBuilder {
    /// `max_failures` is clamped to `1..=DEFAULT_MAX_FAILURES`.
    pub fn new(catalog: PromptCatalog, loader: PromptLoader, max_failures: usize) -> Self {
        Self {
            catalog,
            loader,
            max_failures: max_failures.clamp(1, DEFAULT_MAX_FAILURES),
        }
    }

    pub fn catalog(&self) -> &PromptCatalog {
        &self.catalog
    }

    pub fn build(
        &self,
        stats: &TestRunStats,
        classification: &Classification,
        failures: &[FailedTestRecord],
    ) -> Result<AnalysisPrompt, AnalyzerError> {
        let category = classification.category;
        let guidance = self.catalog.verdict(category);
        let template = self.loader.load(template_name(category))?;

        let vars = PromptVariables {
            data: self.data_block(stats, classification.accuracy, failures),
            verdict: guidance.verdict_label,
            action: guidance.action,
            accuracy: format_accuracy(classification.accuracy),
            impact_rules: category
                .is_alert()
                .then(|| self.catalog.render_impact_rules(category)),
        };
        let body = self.loader.interpolate(&template, &vars);

        if category.is_alert() {
            for rule in self.catalog.impact_rules.iter().filter(|r| r.applies_to(category)) {
                let triggered: Vec<&str> = failures
                    .iter()
                    .filter(|f| rule.matches(&f.name))
                    .map(|f| f.name.as_str())
                    .collect();
                if !triggered.is_empty() {
                    debug!(rule = ?rule.substrings, tests = ?triggered, "Impact rule triggered");
                }
            }
        }

        debug!(%category, listed = failures.len().min(self.max_failures), "Prompt built");
        Ok(AnalysisPrompt(format!(
            "{start}user\n{body}{end}\n{start}model",
            start = TURN_START,
            body = body,
            end = TURN_END
        )))
    }

    /// Counts and accuracy, followed by at most `max_failures` failure entries in input order.
    pub fn data_block(&self, stats: &TestRunStats, accuracy: f64, failures: &[FailedTestRecord]) -> String {
        let mut data = format!(
            "- Total de Casos de Teste: {}\n- Aprovados: {}\n- Reprovados: {}\n- Acurácia: {:.1}%\n",
            stats.total, stats.passed, stats.failed, accuracy
        );
        if !failures.is_empty() {
            data.push_str("\n### Detalhes das Falhas:\n");
            for test in failures.iter().take(self.max_failures) {
                let _ = writeln!(data, "- Teste: {}\n  - Erro: {}", test.name, test.error);
            }
        }
        data
    }
}

fn template_name(category: VerdictCategory) -> &'static str {
    if category.is_alert() {
        "alert"
    } else {
        "stable"
    }
}
