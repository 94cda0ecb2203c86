use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::webhook::WebhookOutcome;

use super::auth::require_api_key;
use super::state::AppState;

const SERVICE_NAME: &str = "Comment-to-Lead Agent";

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "Active",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "groq_connected": state.groq_connected,
        "facebook_token_configured": state.replies.is_configured(),
        "api_key_configured": state.api_key.is_some(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode")]
    pub mode: String,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: String,
    #[serde(rename = "hub.challenge")]
    pub challenge: String,
}

/// Meta's synchronous verification handshake: echo the challenge back
/// when the shared token matches.
pub async fn verify_webhook(
    State(state): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> Response {
    let token_matches = state
        .verify_token
        .as_deref()
        .is_some_and(|expected| expected == params.verify_token);

    if !token_matches {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"detail": "Invalid verification token"})),
        )
            .into_response();
    }

    // Meta sends a numeric challenge; anything else is a bad request.
    if params.challenge.parse::<u64>().is_err() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Invalid challenge format"})),
        )
            .into_response();
    }

    info!(mode = %params.mode, "Webhook verified, echoing challenge");
    params.challenge.into_response()
}

pub async fn receive_webhook(State(state): State<AppState>, body: Bytes) -> Response {
    let outcome = state.pipeline.process(&body).await;

    let status = match outcome {
        WebhookOutcome::Rejected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::OK,
    };

    (status, Json(outcome)).into_response()
}

pub async fn list_leads(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(rejection) = require_api_key(&state, &headers) {
        return rejection.into_response();
    }

    match state.store.read_all().await {
        Ok(leads) => Json(json!({
            "total_leads": leads.len(),
            "leads": leads,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!("Failed to read leads: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"detail": "Failed to read leads"})),
            )
                .into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TestReplyParams {
    pub comment_id: String,
    pub message: String,
}

/// Manual reply-poster invocation. The pipeline never posts replies;
/// this route exists to exercise the capability out of band.
pub async fn test_facebook_reply(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<TestReplyParams>,
) -> Response {
    if let Err(rejection) = require_api_key(&state, &headers) {
        return rejection.into_response();
    }

    let success = state
        .replies
        .post_reply(&params.comment_id, &params.message)
        .await;

    Json(json!({
        "success": success,
        "comment_id": params.comment_id,
        "message": params.message,
    }))
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Classifier;
    use crate::config::MetaConfig;
    use crate::meta::ReplyPoster;
    use crate::storage::LeadStore;
    use crate::webhook::WebhookPipeline;
    use axum::http::HeaderValue;
    use tempfile::TempDir;

    fn state(api_key: Option<&str>, verify_token: Option<&str>) -> (AppState, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = LeadStore::new(dir.path().to_path_buf());
        let pipeline = WebhookPipeline::new(Classifier::new(None), store.clone());
        let replies = ReplyPoster::new(&MetaConfig {
            graph_api_base: "https://graph.facebook.com/v18.0".into(),
            page_access_token: None,
            verify_token: None,
        })
        .unwrap();
        (
            AppState::new(
                pipeline,
                store,
                replies,
                api_key.map(String::from),
                verify_token.map(String::from),
                false,
            ),
            dir,
        )
    }

    #[tokio::test]
    async fn handshake_echoes_numeric_challenge() {
        let (state, _dir) = state(None, Some("secret"));
        let params = VerifyParams {
            mode: "subscribe".into(),
            verify_token: "secret".into(),
            challenge: "1158201444".into(),
        };
        let response = verify_webhook(State(state), Query(params)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn handshake_rejects_wrong_token() {
        let (state, _dir) = state(None, Some("secret"));
        let params = VerifyParams {
            mode: "subscribe".into(),
            verify_token: "guess".into(),
            challenge: "123".into(),
        };
        let response = verify_webhook(State(state), Query(params)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn handshake_rejects_when_no_token_configured() {
        let (state, _dir) = state(None, None);
        let params = VerifyParams {
            mode: "subscribe".into(),
            verify_token: "anything".into(),
            challenge: "123".into(),
        };
        let response = verify_webhook(State(state), Query(params)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn handshake_rejects_non_numeric_challenge() {
        let (state, _dir) = state(None, Some("secret"));
        let params = VerifyParams {
            mode: "subscribe".into(),
            verify_token: "secret".into(),
            challenge: "not-a-number".into(),
        };
        let response = verify_webhook(State(state), Query(params)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn webhook_post_maps_rejected_to_500() {
        let (state, _dir) = state(None, None);
        let response =
            receive_webhook(State(state), Bytes::from_static(b"{broken")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn webhook_post_empty_body_is_ok() {
        let (state, _dir) = state(None, None);
        let response = receive_webhook(State(state), Bytes::new()).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn leads_requires_api_key() {
        let (state, _dir) = state(Some("k3y"), None);

        let response = list_leads(State(state.clone()), HeaderMap::new()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("wrong"));
        let response = list_leads(State(state.clone()), headers).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("k3y"));
        let response = list_leads(State(state), headers).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn leads_locked_when_no_key_configured() {
        let (state, _dir) = state(None, None);
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("anything"));
        let response = list_leads(State(state), headers).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_reply_reports_unconfigured_token() {
        let (state, _dir) = state(Some("k3y"), None);
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("k3y"));
        let params = TestReplyParams {
            comment_id: "c1".into(),
            message: "hello".into(),
        };
        let response =
            test_facebook_reply(State(state), headers, Query(params)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
