use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::AppState;

pub mod books;
pub mod notes;
pub mod tasks;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn home() -> Json<Value> {
    Json(json!({
        "message": "Welcome to WhitLabs API Collection 🚀",
        "available_apis": ["/bookify", "/taskflow", "/notenest"]
    }))
}

/// Build the full application router with the three services mounted
pub fn build_router(cors: CorsLayer, state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .nest("/bookify", books::router())
        .nest("/taskflow", tasks::router())
        .nest("/notenest", notes::router())
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                ),
        )
}
