mod analysis;
mod config;
mod meta;
mod storage;
mod web;
mod webhook;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use analysis::{Classifier, CompletionBackend, GroqBackend};
use meta::ReplyPoster;
use storage::LeadStore;
use webhook::WebhookPipeline;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "captado=info".into()),
        )
        .init();

    info!("Loading configuration...");
    let config = config::AppConfig::load()?;

    let backend: Option<Arc<dyn CompletionBackend>> = match config.groq.api_key.clone() {
        Some(api_key) => {
            info!(model = %config.groq.model, "Groq backend configured");
            Some(Arc::new(GroqBackend::new(&config.groq, api_key)?))
        }
        None => {
            info!("GROQ_API_KEY not set, classification runs on keyword heuristic");
            None
        }
    };
    let classifier = Classifier::new(backend);
    let groq_connected = classifier.has_backend();

    let store = LeadStore::new(config.storage.data_dir.clone());
    let pipeline = WebhookPipeline::new(classifier, store.clone());

    let replies = ReplyPoster::new(&config.meta)?;
    if !replies.is_configured() {
        info!("PAGE_ACCESS_TOKEN not set, reply posting disabled");
    }

    let app_state = web::state::AppState::new(
        pipeline,
        store,
        replies,
        config.server.api_key.clone(),
        config.meta.verify_token.clone(),
        groq_connected,
    );

    let router = web::create_router(app_state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting web server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
