use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::MetaConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Posts replies to comments through the Graph API. Available as a
/// capability for manual invocation; the webhook pipeline computes reply
/// text but never calls this.
pub struct ReplyPoster {
    client: Client,
    graph_api_base: String,
    page_access_token: Option<String>,
}

impl ReplyPoster {
    pub fn new(config: &MetaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build Graph API HTTP client")?;

        Ok(Self {
            client,
            graph_api_base: config.graph_api_base.clone(),
            page_access_token: config.page_access_token.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.page_access_token.is_some()
    }

    /// Reply to a comment. Returns whether the reply went out; an
    /// unconfigured token or any API failure is a `false`, never an error.
    pub async fn post_reply(&self, comment_id: &str, message: &str) -> bool {
        let Some(token) = &self.page_access_token else {
            info!("Page access token not configured, skipping reply");
            return false;
        };

        let url = format!("{}/{}/comments", self.graph_api_base, comment_id);
        let result = self
            .client
            .post(&url)
            .query(&[("message", message), ("access_token", token.as_str())])
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                info!(comment_id, "Reply posted");
                true
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                warn!(comment_id, %status, %body, "Failed to post reply");
                false
            }
            Err(e) => {
                warn!(comment_id, "Error posting reply: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_token_skips_posting() {
        let poster = ReplyPoster::new(&MetaConfig {
            graph_api_base: "https://graph.facebook.com/v18.0".into(),
            page_access_token: None,
            verify_token: None,
        })
        .unwrap();
        assert!(!poster.is_configured());
        assert!(!poster.post_reply("c1", "hello").await);
    }
}
