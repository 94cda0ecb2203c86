use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analysis::{Classification, Priority};

/// Which platform schema matched the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Facebook,
    Instagram,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Facebook => f.write_str("facebook"),
            Source::Instagram => f.write_str("instagram"),
        }
    }
}

/// Canonical comment pulled out of a webhook payload. Exists only when
/// both `user_id` and `comment_text` are non-empty; `post_id` may be
/// empty. Timestamp is assigned at match time, not read from the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedComment {
    pub source: Source,
    pub user_id: String,
    pub comment_text: String,
    pub post_id: String,
    pub timestamp: DateTime<Utc>,
}

/// A classified, persistable lead: the extracted comment plus its
/// classification. `priority` and `ai_response` are set exactly once,
/// here, before the record reaches storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub source: Source,
    pub user_id: String,
    pub comment_text: String,
    pub post_id: String,
    pub timestamp: DateTime<Utc>,
    pub priority: Priority,
    pub ai_response: String,
}

impl Lead {
    pub fn promote(comment: ExtractedComment, classification: &Classification) -> Self {
        Self {
            source: comment.source,
            user_id: comment.user_id,
            comment_text: comment.comment_text,
            post_id: comment.post_id,
            timestamp: comment.timestamp,
            priority: classification.priority,
            ai_response: classification.reply.clone(),
        }
    }
}

/// Terminal state of one webhook delivery. Serializes to the response
/// body the endpoint returns, tagged by `status`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum WebhookOutcome {
    /// Empty request body. Success-shaped, not an error.
    Empty { message: &'static str },
    /// Body present but not valid JSON.
    Rejected { message: &'static str },
    /// Valid JSON, but no schema produced a usable comment.
    Ignored { message: &'static str },
    /// A comment was extracted, classified and persisted.
    Processed {
        source: Source,
        lead: Lead,
        ai_analysis: Classification,
        // Reply posting is not wired into the pipeline; always false.
        reply_sent: bool,
    },
}
