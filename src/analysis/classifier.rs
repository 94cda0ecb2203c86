use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use super::backend::CompletionBackend;
use super::types::{Classification, Priority};

const SYSTEM_PROMPT: &str = r#"You are a professional Sales Assistant. Analyze this comment and provide:
1. A short, helpful response (max 20 words) if the user is asking about price, location, or availability
2. Suggest they check their DMs for a special offer
3. Categorize as 'High', 'Medium', or 'Low' priority

Format your response as JSON:
{
    "ai_response_text": "your response here",
    "priority_score": "High/Medium/Low"
}"#;

/// Comments containing any of these read as pricing/contact inquiries.
const INQUIRY_KEYWORDS: &[&str] = &[
    "price",
    "cost",
    "how much",
    "info",
    "information",
    "details",
    "contact",
];

const INQUIRY_REPLY: &str =
    "Thanks for your interest! Check your DMs for a special offer with pricing details.";
const GENERIC_REPLY: &str = "Thank you for your comment! We'll get back to you soon.";
const DEFAULT_REPLY: &str = "Thank you for your interest!";

/// Classifies a comment's sales intent. Holds the optional completion
/// backend chosen once at startup; without one, every call takes the
/// keyword heuristic. Never errors: any backend failure resolves to the
/// same heuristic.
pub struct Classifier {
    backend: Option<Arc<dyn CompletionBackend>>,
}

/// What the model is asked to emit. Both fields optional so a partial
/// answer still counts as a successful parse.
#[derive(Deserialize)]
struct RawClassification {
    ai_response_text: Option<String>,
    priority_score: Option<String>,
}

impl Classifier {
    pub fn new(backend: Option<Arc<dyn CompletionBackend>>) -> Self {
        Self { backend }
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    pub async fn classify(&self, comment_text: &str) -> Classification {
        let Some(backend) = &self.backend else {
            return heuristic(comment_text);
        };

        let user_text = format!("Comment: {comment_text}");
        match backend.complete(SYSTEM_PROMPT, &user_text).await {
            Ok(raw) => match parse_completion(&raw) {
                Some(classification) => {
                    info!(priority = %classification.priority, "Comment classified by backend");
                    classification
                }
                None => {
                    warn!(%raw, "Unparsable classification, using keyword heuristic");
                    heuristic(comment_text)
                }
            },
            Err(e) => {
                warn!("Classification backend failed, using keyword heuristic: {e}");
                heuristic(comment_text)
            }
        }
    }
}

/// Deterministic keyword classification. Both the no-backend default and
/// the fallback for every backend failure.
pub fn heuristic(comment_text: &str) -> Classification {
    let lower = comment_text.to_lowercase();
    if INQUIRY_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        Classification {
            priority: Priority::High,
            reply: INQUIRY_REPLY.to_string(),
        }
    } else {
        Classification {
            priority: Priority::Normal,
            reply: GENERIC_REPLY.to_string(),
        }
    }
}

fn parse_completion(raw: &str) -> Option<Classification> {
    let cleaned = strip_code_fences(raw);
    let parsed: RawClassification = serde_json::from_str(&cleaned).ok()?;

    Some(Classification {
        priority: parsed
            .priority_score
            .as_deref()
            .map(Priority::from_score)
            .unwrap_or_default(),
        reply: parsed
            .ai_response_text
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_REPLY.to_string()),
    })
}

/// Models routinely wrap the JSON in a markdown code block.
fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}
