use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde_json::{json, Value};

use super::state::AppState;

const API_KEY_HEADER: &str = "x-api-key";

/// Admin-route guard: the `X-API-Key` header must match the configured
/// key. No key configured means the routes stay locked.
pub fn require_api_key(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<(), (StatusCode, Json<Value>)> {
    let presented = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());

    match (&state.api_key, presented) {
        (Some(expected), Some(presented)) if expected.as_ref() == presented => Ok(()),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Invalid API Key"})),
        )),
    }
}
