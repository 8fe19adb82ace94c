use serde::{Deserialize, Serialize};

/// A named axis of approval in the review system, e.g. `Code-Review` or `Verified`.
///
/// Categories are owned by a server configuration and never change after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictCategory {
    value: String,
    description: String,
}

impl VerdictCategory {
    pub fn new(value: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: description.into(),
        }
    }

    /// Machine identifier, as carried in the `type` field of an approval.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Human-readable label.
    pub fn description(&self) -> &str {
        &self.description
    }
}
