use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::api::AppState;

/// Liveness only; never touches the catalog.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}
