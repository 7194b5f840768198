use serde::{Deserialize, Serialize};

/// One validation problem found in a spec document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The rule that generated this diagnostic
    pub rule: String,

    /// Human-readable message
    pub message: String,
}

impl Diagnostic {
    pub fn new(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            message: message.into(),
        }
    }
}
