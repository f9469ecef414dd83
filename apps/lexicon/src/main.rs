mod config;
mod errors;
mod generation;
mod ground_truth;
mod llm_client;
mod models;
mod morphology;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::ground_truth::{GroundTruthStore, JsonEntryFile};
use crate::llm_client::OllamaClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Kannada lexicon service v{}", env!("CARGO_PKG_VERSION"));

    // Load the ground truth once; approvals append to it for the rest of the session
    let entry_file = JsonEntryFile::new(&config.ground_truth_path);
    let store = GroundTruthStore::from_entries(entry_file.load()?);
    if store.is_empty() {
        info!(
            "No verified entries in {}; generating without exemplars until the first approval",
            entry_file.path().display()
        );
    } else {
        info!(
            "Ground truth loaded: {} verified entries from {}",
            store.len(),
            entry_file.path().display()
        );
    }

    // Initialize generation service client
    let llm = OllamaClient::new(&config.ollama_url, &config.ollama_model)?;
    info!(
        "Generation service: {} (model: {})",
        config.ollama_url,
        llm.model()
    );

    let state = AppState::new(store, entry_file, Arc::new(llm), config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // the review UI is served from a different origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
