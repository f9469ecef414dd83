use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::config::Config;
use crate::ground_truth::{GroundTruthStore, JsonEntryFile};
use crate::llm_client::GenerationService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Readers clone a snapshot and drop the guard. The write guard is only
    /// taken for the in-memory append, after the file is on disk.
    pub store: Arc<RwLock<GroundTruthStore>>,
    /// Serializes approvals across persist + append.
    pub approvals: Arc<Mutex<()>>,
    pub entry_file: JsonEntryFile,
    /// Pluggable generation backend. Default: OllamaClient.
    pub llm: Arc<dyn GenerationService>,
    pub config: Config,
}

impl AppState {
    pub fn new(
        store: GroundTruthStore,
        entry_file: JsonEntryFile,
        llm: Arc<dyn GenerationService>,
        config: Config,
    ) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            approvals: Arc::new(Mutex::new(())),
            entry_file,
            llm,
            config,
        }
    }

    /// Point-in-time copy of the store for one request.
    pub async fn snapshot(&self) -> GroundTruthStore {
        self.store.read().await.snapshot()
    }
}
