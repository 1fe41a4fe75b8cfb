use serde::{Deserialize, Serialize};
use crate::errors::AnalyzerError;

/// Aggregate counts of a test run. `total` is always `passed + failed + skipped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TestRunStats {
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
    pub total: u64,
}

impl TestRunStats {
    /// `None` when the counts do not fit in a `u64` total.
    pub fn try_new(passed: u64, failed: u64, skipped: u64) -> Option<Self> {
        let total = passed.checked_add(failed)?.checked_add(skipped)?;
        Some(Self { passed, failed, skipped, total })
    }

    /// Pass rate in percent; 0 for an empty run.
    pub fn accuracy(&self) -> f64 {
        if self.total > 0 {
            self.passed as f64 / self.total as f64 * 100.0
        } else {
            0.0
        }
    }
}

/// String-valued counts as produced by the stats extractor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawStats {
    pub passed: String,
    pub failed: String,
    pub skipped: String,
    pub total: String,
}

impl From<TestRunStats> for RawStats {
    fn from(stats: TestRunStats) -> Self {
        Self {
            passed: stats.passed.to_string(),
            failed: stats.failed.to_string(),
            skipped: stats.skipped.to_string(),
            total: stats.total.to_string(),
        }
    }
}

impl RawStats {
    /// Validate the counts. Any non-integer field rejects the whole record;
    /// an empty field counts as 0. `total` is recomputed from its parts.
    pub fn parse(&self) -> Result<TestRunStats, AnalyzerError> {
        let passed = parse_count("passed", &self.passed)?;
        let failed = parse_count("failed", &self.failed)?;
        let skipped = parse_count("skipped", &self.skipped)?;
        let stats = TestRunStats::try_new(passed, failed, skipped).ok_or_else(|| {
            AnalyzerError::InvalidStatistics(format!(
                "passed + failed + skipped overflows: {} + {} + {}",
                passed, failed, skipped
            ))
        })?;

        let total = parse_count("total", &self.total)?;
        if total != stats.total {
            return Err(AnalyzerError::InvalidStatistics(format!(
                "total {} does not match passed + failed + skipped = {}",
                total, stats.total
            )));
        }
        Ok(stats)
    }
}

fn parse_count(field: &str, value: &str) -> Result<u64, AnalyzerError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0);
    }
    value.parse::<u64>().map_err(|e| {
        AnalyzerError::InvalidStatistics(format!("{} = {:?}: {}", field, value, e))
    })
}
