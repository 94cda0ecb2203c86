pub mod extract;
pub mod types;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::analysis::Classifier;
use crate::storage::LeadStore;
use extract::SCHEMAS;
pub use types::{ExtractedComment, Lead, Source, WebhookOutcome};

/// Sequences one webhook delivery: extraction across the known schemas
/// in fixed order, classification, lead assembly, persistence handoff.
/// Every branch resolves to a `WebhookOutcome`; nothing propagates.
pub struct WebhookPipeline {
    classifier: Classifier,
    store: LeadStore,
}

impl WebhookPipeline {
    pub fn new(classifier: Classifier, store: LeadStore) -> Self {
        Self { classifier, store }
    }

    pub async fn process(&self, body: &[u8]) -> WebhookOutcome {
        if body.is_empty() {
            return WebhookOutcome::Empty {
                message: "No data received",
            };
        }

        let payload: Value = match serde_json::from_slice(body) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Rejecting webhook body: {e}");
                return WebhookOutcome::Rejected {
                    message: "Request body is not valid JSON",
                };
            }
        };

        // First matching schema wins; the discriminators make the two
        // shapes mutually exclusive in practice.
        let Some(comment) = SCHEMAS.iter().find_map(|s| s.try_extract(&payload)) else {
            return WebhookOutcome::Ignored {
                message: "No valid comment data found",
            };
        };

        let classification = self.classifier.classify(&comment.comment_text).await;
        let source = comment.source;
        let lead = Lead::promote(comment, &classification);

        info!(
            source = %lead.source,
            user_id = %lead.user_id,
            priority = %lead.priority,
            "Lead extracted"
        );

        // Persistence failure is an operational concern, not a request
        // failure: the outcome still reports the lead.
        if let Err(e) = self.store.append(&lead).await {
            error!("Failed to persist lead: {e:#}");
        }

        WebhookOutcome::Processed {
            source,
            lead,
            ai_analysis: classification,
            reply_sent: false,
        }
    }
}
