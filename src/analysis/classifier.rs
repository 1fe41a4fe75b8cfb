use crate::models::{Classification, FailedTestRecord, TestRunStats, VerdictCategory};
use tracing::debug;

/// Test names covering core device functions. Any failure among them
/// makes the build unacceptable regardless of pass rate.
pub const DEFAULT_CRITICAL_TESTS: &[&str] = &[
    "Conta Google",
    "Atualizar Sistema",
    "Validar Versão de Software",
    "Realizar Uma Ligação",
];

pub const DEFAULT_ACCURACY_THRESHOLD: f64 = 60.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationPolicy {
    /// Substrings matched against failing test names.
    pub critical_tests: Vec<String>,
    /// Accuracy strictly below this is critical.
    pub accuracy_threshold: f64,
}

impl Default for ClassificationPolicy {
    fn default() -> Self {
        Self {
            critical_tests: DEFAULT_CRITICAL_TESTS.iter().map(|s| s.to_string()).collect(),
            accuracy_threshold: DEFAULT_ACCURACY_THRESHOLD,
        }
    }
}

impl ClassificationPolicy {
    pub fn is_critical(&self, test_name: &str) -> bool {
        self.critical_tests.iter().any(|c| test_name.contains(c.as_str()))
    }
}

/// Judge the run. Rules are checked in order: no failures in a non-empty
/// run is stable; a critical failure or low accuracy is critical;
/// anything else is unstable.
pub fn classify(
    stats: &TestRunStats,
    failures: &[FailedTestRecord],
    policy: &ClassificationPolicy,
) -> Classification {
    let accuracy = stats.accuracy();
    let critical_failed = failures.iter().any(|f| policy.is_critical(&f.name));

    let category = if stats.failed == 0 && stats.total > 0 {
        VerdictCategory::Stable
    } else if critical_failed || accuracy < policy.accuracy_threshold {
        VerdictCategory::Critical
    } else {
        VerdictCategory::Unstable
    };

    debug!(%category, accuracy, critical_failed, "Run classified");
    Classification { category, accuracy, critical_failed }
}
