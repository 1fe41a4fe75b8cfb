use std::collections::HashSet;
use std::sync::LazyLock;
use scraper::{ElementRef, Html, Selector};
use crate::errors::ExtractionError;
use crate::models::FailedTestRecord;
use tracing::{debug, warn};

static DETAILS_TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table#test-details"));
static FAIL_LABEL: LazyLock<Selector> = LazyLock::new(|| selector("span.label.fail"));
static NAME_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td.details-col-name"));
static MESSAGE_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td.details-col-msg"));

/// Names that are really status labels leaking out of a malformed row.
const STATUS_PREFIXES: &[&str] = &["PASS", "FAIL", "SKIP"];

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

/// Walk the `test-details` table and collect every row marked FAIL.
pub fn extract_failed_tests(html: &str) -> Result<Vec<FailedTestRecord>, ExtractionError> {
    let document = Html::parse_document(html);
    let table = document
        .select(&DETAILS_TABLE)
        .next()
        .ok_or(ExtractionError::TableNotFound)?;

    let mut records = Vec::new();
    for label in table.select(&FAIL_LABEL) {
        if cell_text(&label) != "FAIL" {
            continue;
        }
        match read_row(&label) {
            Ok(record) => {
                if looks_like_status(&record.name) {
                    debug!(name = %record.name, "Skipping status label mistaken for a test name");
                    continue;
                }
                records.push(record);
            }
            Err(e) => debug!(error = %e, "Skipping test details row"),
        }
    }

    Ok(deduplicate_failures(records))
}

fn read_row(label: &ElementRef<'_>) -> Result<FailedTestRecord, ExtractionError> {
    let row = label
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "tr")
        .ok_or_else(|| ExtractionError::RowMalformed("FAIL label outside of a row".into()))?;

    let name = row
        .select(&NAME_CELL)
        .next()
        .ok_or_else(|| ExtractionError::RowMalformed("missing name cell".into()))?;
    let message = row
        .select(&MESSAGE_CELL)
        .next()
        .ok_or_else(|| ExtractionError::RowMalformed("missing message cell".into()))?;

    Ok(FailedTestRecord::new(cell_text(&name), cell_text(&message)))
}

/// Concatenate the element's text fragments, each stripped of surrounding whitespace.
fn cell_text(el: &ElementRef<'_>) -> String {
    el.text().map(str::trim).filter(|s| !s.is_empty()).collect()
}

fn looks_like_status(name: &str) -> bool {
    let upper = name.to_uppercase();
    STATUS_PREFIXES.iter().any(|p| upper.starts_with(p))
}

/// Drop repeated `(name, error)` pairs, keeping the first occurrence.
pub fn deduplicate_failures(records: Vec<FailedTestRecord>) -> Vec<FailedTestRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert((r.name.clone(), r.error.clone())))
        .collect()
}

/// Recoverable form of [`extract_failed_tests`]: logs the failure and yields an empty list.
pub fn parse_log_failed_details(html: &str) -> Vec<FailedTestRecord> {
    match extract_failed_tests(html) {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "Failed to extract failure details from log");
            Vec::new()
        }
    }
}
