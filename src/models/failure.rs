use serde::{Deserialize, Serialize};

/// A failing test as listed in the log's test details table.
/// Identity is the `(name, error)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FailedTestRecord {
    pub name: String,
    pub error: String,
}

impl FailedTestRecord {
    pub fn new(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self { name: name.into(), error: error.into() }
    }
}
