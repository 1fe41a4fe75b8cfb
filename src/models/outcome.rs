use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::failure::FailedTestRecord;
use super::stats::TestRunStats;
use super::verdict::VerdictCategory;

/// Result of one analysis request. `report` always holds something
/// printable: the composed report, or the fixed error string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub report: String,
    pub verdict: Option<VerdictCategory>,
    pub stats: Option<TestRunStats>,
    pub accuracy: Option<f64>,
    pub failures: Vec<FailedTestRecord>,
    /// Wall-clock time of the generator call, if it was made.
    pub generation_ms: Option<u64>,
    /// Set when the pipeline halted; `report` then carries the user-facing message.
    pub error: Option<String>,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisOutcome {
    /// An outcome with nothing computed yet.
    pub fn new(failures: Vec<FailedTestRecord>) -> Self {
        Self {
            report: String::new(),
            verdict: None,
            stats: None,
            accuracy: None,
            failures,
            generation_ms: None,
            error: None,
            analyzed_at: Utc::now(),
        }
    }

    /// Replace the report with the halting error's fixed message.
    pub fn halt(mut self, message: String, detail: String) -> Self {
        self.report = message;
        self.error = Some(detail);
        self
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
