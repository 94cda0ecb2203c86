pub mod auth;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::health))
        .route(
            "/webhook",
            get(routes::verify_webhook).post(routes::receive_webhook),
        )
        .route("/leads", get(routes::list_leads))
        .route("/test/facebook-reply", post(routes::test_facebook_reply))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
