pub mod stats;
pub mod failures;

pub use stats::{extract_stats, parse_log_stats};
pub use failures::{deduplicate_failures, extract_failed_tests, parse_log_failed_details};
