use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::handlers::require_headword;
use crate::models::VerifiedEntry;
use crate::morphology::{classify_if_inflected, PartOfSpeech, TemplateId};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    pub headword: String,
    pub part_of_speech: String,
    pub wikitext: String,
    pub translation: Option<String>,
    pub provenance: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApproveResponse {
    pub entry: VerifiedEntry,
    pub store_version: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct EntryFilter {
    pub part_of_speech: Option<String>,
    pub template_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EntryListResponse {
    pub entries: Vec<VerifiedEntry>,
    pub store_version: u64,
}

/// POST /api/v1/entries
///
/// Records a reviewer-approved entry. The template is recomputed from the
/// headword, never taken from the client; adjectives and adverbs are stored
/// without one. The document on disk is written first; the in-memory store
/// only changes if that succeeds.
pub async fn handle_approve(
    State(state): State<AppState>,
    Json(req): Json<ApproveRequest>,
) -> Result<(StatusCode, Json<ApproveResponse>), AppError> {
    let headword = require_headword(&req.headword)?;
    if req.wikitext.trim().is_empty() {
        return Err(AppError::Validation("wikitext cannot be empty".to_string()));
    }
    let part_of_speech = req.part_of_speech.parse::<PartOfSpeech>()?;
    let classification = classify_if_inflected(headword, part_of_speech)?;

    let mut entry = VerifiedEntry::new(
        headword,
        part_of_speech,
        classification.map(|c| c.template_id),
        req.wikitext.trim(),
    );
    entry.translation = req.translation.filter(|t| !t.trim().is_empty());
    entry.provenance = req.provenance;

    // One approval at a time; readers keep using the store while the file is written.
    let _approval = state.approvals.lock().await;
    let existing = state.snapshot().await;

    // Blocking file I/O (write + fsync + rename) runs off the async executor.
    let entry_file = state.entry_file.clone();
    let record = entry.clone();
    tokio::task::spawn_blocking(move || entry_file.append(existing.entries(), &record))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed while persisting: {e}"))
        })??;

    let store_version = state.store.write().await.add(entry.clone());

    info!(
        "Verified entry for '{}' added ({}, store v{})",
        entry.headword,
        entry.template_label(),
        store_version
    );

    Ok((
        StatusCode::CREATED,
        Json(ApproveResponse {
            entry,
            store_version,
        }),
    ))
}

/// GET /api/v1/entries
///
/// Lists verified entries, optionally filtered by part of speech or template.
pub async fn handle_list_entries(
    State(state): State<AppState>,
    Query(filter): Query<EntryFilter>,
) -> Result<Json<EntryListResponse>, AppError> {
    let snapshot = state.snapshot().await;

    let part_of_speech = filter
        .part_of_speech
        .as_deref()
        .map(str::parse::<PartOfSpeech>)
        .transpose()?;
    let template_id = filter
        .template_id
        .as_deref()
        .map(str::parse::<TemplateId>)
        .transpose()?;

    let entries: Vec<VerifiedEntry> = match (part_of_speech, template_id) {
        (_, Some(template)) => snapshot
            .find_by_template(template)
            .filter(|e| part_of_speech.map_or(true, |p| e.part_of_speech == p))
            .cloned()
            .collect(),
        (Some(pos), None) => snapshot.find_by_part_of_speech(pos).cloned().collect(),
        (None, None) => snapshot.entries().to_vec(),
    };

    Ok(Json(EntryListResponse {
        entries,
        store_version: snapshot.version(),
    }))
}

/// GET /api/v1/entries/:headword
pub async fn handle_get_entry(
    State(state): State<AppState>,
    Path(headword): Path<String>,
) -> Result<Json<VerifiedEntry>, AppError> {
    let snapshot = state.snapshot().await;
    snapshot
        .current(headword.trim())
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No verified entry for '{headword}'")))
}

/// GET /api/v1/entries/:headword/history
pub async fn handle_entry_history(
    State(state): State<AppState>,
    Path(headword): Path<String>,
) -> Result<Json<Vec<VerifiedEntry>>, AppError> {
    let snapshot = state.snapshot().await;
    let history: Vec<VerifiedEntry> = snapshot
        .history(headword.trim())
        .into_iter()
        .cloned()
        .collect();
    if history.is_empty() {
        return Err(AppError::NotFound(format!(
            "No verified entry for '{headword}'"
        )));
    }
    Ok(Json(history))
}
