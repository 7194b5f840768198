use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Read-only projection of a validated spec document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecSummary {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Every token id referenced anywhere in the document
    pub tokens: BTreeSet<String>,
    /// Where the document came from; opaque
    pub source: String,
    pub errors: Vec<String>,
}

impl SpecSummary {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
