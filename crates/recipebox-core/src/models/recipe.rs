use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single recipe record.
///
/// The payload is whatever JSON document the source served. Its shape is
/// never inspected or validated: it travels from the response body to
/// storage to the page untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recipe(Value);

impl Recipe {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Best-effort display name, only used for log lines
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }
}
