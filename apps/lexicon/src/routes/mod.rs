pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::ground_truth::handlers as entries;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Deterministic morphology + retrieval
        .route("/api/v1/classify", post(generation::handle_classify))
        .route("/api/v1/exemplars", post(generation::handle_exemplars))
        // Generation service calls
        .route("/api/v1/generate", post(generation::handle_generate))
        .route("/api/v1/sandbox", post(generation::handle_sandbox))
        .route(
            "/api/v1/sandbox/render",
            post(generation::handle_render_usage),
        )
        // Ground truth
        .route(
            "/api/v1/entries",
            get(entries::handle_list_entries).post(entries::handle_approve),
        )
        .route("/api/v1/entries/:headword", get(entries::handle_get_entry))
        .route(
            "/api/v1/entries/:headword/history",
            get(entries::handle_entry_history),
        )
        .with_state(state)
}
