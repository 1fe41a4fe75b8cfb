use std::sync::LazyLock;
use regex::Regex;
use serde_json::Value;
use crate::errors::ExtractionError;
use crate::models::RawStats;
use tracing::{debug, warn};

/// Robot Framework embeds the suite statistics as
/// `window.output["stats"] = [[{"pass":..,"fail":..,"skip":..}], ...];`
static STATS_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"window\.output\["stats"\]\s*=\s*(.*?);"#).expect("stats pattern is valid")
});

/// Pull the aggregate counts out of the first stats assignment in the log.
pub fn extract_stats(html: &str) -> Result<RawStats, ExtractionError> {
    let captures = STATS_ASSIGNMENT
        .captures(html)
        .ok_or(ExtractionError::StatsNotFound)?;
    let literal = &captures[1];

    let parsed: Value = serde_json::from_str(literal)
        .map_err(|e| ExtractionError::StatsMalformed(format!("invalid JSON: {}", e)))?;

    let totals = parsed
        .get(0)
        .and_then(|row| row.get(0))
        .ok_or_else(|| ExtractionError::StatsMalformed("no record at [0][0]".into()))?;
    if !totals.is_object() {
        return Err(ExtractionError::StatsMalformed(format!(
            "record at [0][0] is not an object: {}",
            totals
        )));
    }

    let passed = read_count(totals, "pass");
    let failed = read_count(totals, "fail");
    let skipped = read_count(totals, "skip");
    // Left empty when a part is not a count; RawStats::parse reports it.
    let total = [&passed, &failed, &skipped]
        .iter()
        .map(|v| v.trim().parse::<u64>().ok())
        .try_fold(0u64, |acc, n| acc.checked_add(n?))
        .map(|t| t.to_string())
        .unwrap_or_default();
    debug!(
        passed = %passed,
        failed = %failed,
        skipped = %skipped,
        "Stats blob parsed"
    );
    Ok(RawStats { passed, failed, skipped, total })
}

/// The count as written in the log. Absent or null is "0"; anything else is
/// passed through unvalidated.
fn read_count(totals: &Value, key: &str) -> String {
    match totals.get(key) {
        None | Some(Value::Null) => "0".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(v) => v.to_string(),
    }
}

/// Recoverable form of [`extract_stats`]: logs the failure and yields `None`.
pub fn parse_log_stats(html: &str) -> Option<RawStats> {
    match extract_stats(html) {
        Ok(stats) => Some(stats),
        Err(e) => {
            warn!(error = %e, "Failed to extract statistics from log");
            None
        }
    }
}
