use serde::{Deserialize, Serialize};
use std::fmt;

/// Sales-priority tier assigned to an inbound comment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Normal,
    Medium,
    High,
}

impl Priority {
    /// Lenient parse of a model-produced tier. Anything unrecognized
    /// lands on Normal rather than failing the classification.
    pub fn from_score(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Priority::High,
            "medium" => Priority::Medium,
            "low" => Priority::Low,
            _ => Priority::Normal,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Normal => "Normal",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of classifying one comment: a tier plus a suggested reply.
/// Serialized with the wire names the Groq prompt asks the model for,
/// so the webhook response's `ai_analysis` mirrors the raw analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(rename = "priority_score")]
    pub priority: Priority,
    #[serde(rename = "ai_response_text")]
    pub reply: String,
}
