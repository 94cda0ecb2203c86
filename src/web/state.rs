use std::sync::Arc;

use crate::meta::ReplyPoster;
use crate::storage::LeadStore;
use crate::webhook::WebhookPipeline;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<WebhookPipeline>,
    pub store: LeadStore,
    pub replies: Arc<ReplyPoster>,
    pub api_key: Option<Arc<str>>,
    pub verify_token: Option<Arc<str>>,
    pub groq_connected: bool,
}

impl AppState {
    pub fn new(
        pipeline: WebhookPipeline,
        store: LeadStore,
        replies: ReplyPoster,
        api_key: Option<String>,
        verify_token: Option<String>,
        groq_connected: bool,
    ) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            store,
            replies: Arc::new(replies),
            api_key: api_key.map(Into::into),
            verify_token: verify_token.map(Into::into),
            groq_connected,
        }
    }
}
