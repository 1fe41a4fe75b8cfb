use serde::{Deserialize, Serialize};

/// Overall health judgement for a test run. Exactly one is assigned per analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictCategory {
    /// No failures in a non-empty run.
    Stable,
    /// Failures exist, none critical, accuracy above threshold.
    Unstable,
    /// A critical test failed or accuracy fell below threshold.
    Critical,
}

impl VerdictCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stable => "STABLE",
            Self::Unstable => "UNSTABLE",
            Self::Critical => "CRITICAL",
        }
    }

    /// Whether the narrative should use the alert templates.
    pub fn is_alert(&self) -> bool {
        !matches!(self, Self::Stable)
    }
}

impl std::fmt::Display for VerdictCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier output consumed by the prompt builder and the report header.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: VerdictCategory,
    pub accuracy: f64,
    pub critical_failed: bool,
}
