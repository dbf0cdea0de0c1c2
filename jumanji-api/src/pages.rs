use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};
use crate::state::AppState;

/// Landing page, health probe, and every other static asset under `public_dir`.
/// None of these touch the database or the notification channels.
pub fn routes(public_dir: &Path) -> Router<AppState> {
    Router::new()
        .route_service("/", ServeFile::new(public_dir.join("index.html")))
        .route("/health", get(health))
        .fallback_service(ServeDir::new(public_dir))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
