use chrono::Utc;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::types::{ExtractedComment, Source};

/// Shape of a Meta comment webhook, with every field lenient: missing or
/// wrongly-typed JSON collapses to an empty default instead of an error.
/// Facebook page-feed and Instagram media-comments payloads share this
/// skeleton and differ only in discriminator values and field names.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WebhookPayload {
    #[serde(deserialize_with = "lenient")]
    object: String,
    #[serde(deserialize_with = "lenient_list")]
    entry: Vec<Entry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Entry {
    #[serde(deserialize_with = "lenient_list")]
    changes: Vec<Change>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Change {
    #[serde(deserialize_with = "lenient")]
    field: String,
    #[serde(deserialize_with = "lenient")]
    value: ChangeValue,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChangeValue {
    #[serde(deserialize_with = "lenient")]
    from: Author,
    #[serde(deserialize_with = "lenient")]
    message: String,
    #[serde(deserialize_with = "lenient")]
    text: String,
    #[serde(deserialize_with = "lenient")]
    post_id: String,
    #[serde(deserialize_with = "lenient")]
    media: Media,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Author {
    #[serde(deserialize_with = "lenient")]
    id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Media {
    #[serde(deserialize_with = "lenient")]
    id: String,
}

/// Swallow type mismatches: a field that fails to deserialize reads as
/// absent. Safe here because extraction runs over an already-parsed
/// `serde_json::Value` tree.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(T::deserialize(deserializer).unwrap_or_default())
}

/// Per-element leniency for the entry/changes lists. One malformed
/// element reads as an empty default; its siblings still count, so a
/// usable change earlier or later in the walk is never lost.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let values: Vec<Value> = Vec::deserialize(deserializer).unwrap_or_default();
    Ok(values
        .into_iter()
        .map(|v| T::deserialize(v).unwrap_or_default())
        .collect())
}

/// One platform's payload shape: discriminator values plus which value
/// fields carry the comment body and the container id.
pub struct SourceSchema {
    pub source: Source,
    object: &'static str,
    change_field: &'static str,
    body: fn(&ChangeValue) -> &str,
    container: fn(&ChangeValue) -> &str,
}

/// Known schemas in match-priority order: facebook is always tried first.
pub const SCHEMAS: &[SourceSchema] = &[
    SourceSchema {
        source: Source::Facebook,
        object: "page",
        change_field: "feed",
        body: |v| &v.message,
        container: |v| &v.post_id,
    },
    SourceSchema {
        source: Source::Instagram,
        object: "instagram",
        change_field: "comments",
        body: |v| &v.text,
        container: |v| &v.media.id,
    },
];

impl SourceSchema {
    /// Extract the first usable comment from `payload` under this schema.
    ///
    /// The discriminator must match, and a change must yield a non-empty
    /// author id and body; the first such change (entry order, then change
    /// order) wins and the rest are not evaluated. Container id is
    /// optional and defaults to empty.
    pub fn try_extract(&self, payload: &Value) -> Option<ExtractedComment> {
        let payload = WebhookPayload::deserialize(payload).unwrap_or_default();
        if payload.object != self.object {
            return None;
        }

        for entry in &payload.entry {
            for change in &entry.changes {
                if change.field != self.change_field {
                    continue;
                }

                let user_id = change.value.from.id.as_str();
                let body = (self.body)(&change.value);
                if user_id.is_empty() || body.is_empty() {
                    continue;
                }

                return Some(ExtractedComment {
                    source: self.source,
                    user_id: user_id.to_string(),
                    comment_text: body.to_string(),
                    post_id: (self.container)(&change.value).to_string(),
                    timestamp: Utc::now(),
                });
            }
        }

        None
    }
}
