use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::analysis::ClassificationPolicy;
use crate::llm::SamplingConfig;
use crate::prompts::{ImpactRule, PromptBuilder, PromptCatalog, PromptLoader, VerdictGuidance, DEFAULT_MAX_FAILURES};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AnalyzerConfig {
    pub llm: Option<LLMConfig>,
    pub sampling: Option<SamplingConfig>,
    pub classification: Option<ClassificationConfig>,
    pub prompt: Option<PromptConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LLMConfig {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ClassificationConfig {
    pub critical_tests: Option<Vec<String>>,
    pub accuracy_threshold: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct PromptConfig {
    pub max_failures: Option<usize>,
    pub templates_dir: Option<String>,
    pub verdicts: Option<Vec<VerdictGuidance>>,
    pub impact_rules: Option<Vec<ImpactRule>>,
}

pub const DEFAULT_PROVIDER: &str = "llamacpp";

impl AnalyzerConfig {
    pub fn provider(&self) -> &str {
        self.llm
            .as_ref()
            .and_then(|l| l.provider.as_deref())
            .unwrap_or(DEFAULT_PROVIDER)
    }

    pub fn sampling(&self) -> SamplingConfig {
        self.sampling.clone().unwrap_or_default()
    }

    pub fn policy(&self) -> ClassificationPolicy {
        let mut policy = ClassificationPolicy::default();
        if let Some(c) = &self.classification {
            if let Some(names) = &c.critical_tests {
                policy.critical_tests = names.clone();
            }
            if let Some(threshold) = c.accuracy_threshold {
                policy.accuracy_threshold = threshold;
            }
        }
        policy
    }

    pub fn prompt_builder(&self) -> PromptBuilder {
        let mut catalog = PromptCatalog::default();
        let mut templates_dir = None;
        let mut max_failures = DEFAULT_MAX_FAILURES;
        if let Some(p) = &self.prompt {
            if let Some(verdicts) = &p.verdicts {
                catalog.verdicts = verdicts.clone();
            }
            if let Some(rules) = &p.impact_rules {
                catalog.impact_rules = rules.clone();
            }
            templates_dir = p.templates_dir.as_ref().map(PathBuf::from);
            max_failures = p.max_failures.unwrap_or(DEFAULT_MAX_FAILURES);
        }
        PromptBuilder::new(catalog, PromptLoader::new(templates_dir), max_failures)
    }
}
