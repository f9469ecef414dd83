use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version and the size of the loaded ground truth.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let store = state.snapshot().await;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "kannada-lexicon",
        "model": state.config.ollama_model,
        "verified_entries": store.len(),
        "store_version": store.version()
    }))
}
