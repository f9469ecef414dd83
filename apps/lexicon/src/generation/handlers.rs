//! Axum route handlers for classification and generation.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::exemplar_selector::{
    select_exemplars, select_exemplars_by_part_of_speech, ExemplarSet,
};
use crate::generation::generator::{generate_entry, generate_sandbox, EntryDraft, SandboxResult};
use crate::generation::sandbox::{render_usage_template, render_usage_template_with_translation};
use crate::models::VerifiedEntry;
use crate::morphology::directive::template_directive;
use crate::morphology::{classify, classify_if_inflected, ClassificationResult, PartOfSpeech, Word};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub headword: String,
    /// Accepts any casing: "Noun", "NOUN", "noun".
    pub part_of_speech: String,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub classification: ClassificationResult,
    pub template_directive: String,
}

#[derive(Debug, Deserialize)]
pub struct ExemplarsRequest {
    pub headword: String,
    pub part_of_speech: String,
    pub max_count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct WordRequest {
    pub headword: String,
    pub part_of_speech: String,
    pub translation: Option<String>,
    /// Draft a new entry even if a verified one exists.
    #[serde(default)]
    pub regenerate: bool,
}

#[derive(Debug, Deserialize)]
pub struct RenderUsageRequest {
    pub sentence: String,
    pub translation: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RenderUsageResponse {
    pub usage: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerateResponse {
    /// Already in the ground truth; no generation call was made.
    Verified { entry: VerifiedEntry },
    Draft { draft: EntryDraft },
}

impl WordRequest {
    fn to_word(&self) -> Result<Word, AppError> {
        let headword = require_headword(&self.headword)?;
        let mut word = Word::new(headword, self.part_of_speech.parse::<PartOfSpeech>()?);
        word.translation = self
            .translation
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        Ok(word)
    }
}

/// Trims surrounding whitespace and rejects blank headwords.
pub(crate) fn require_headword(headword: &str) -> Result<&str, AppError> {
    let headword = headword.trim();
    if headword.is_empty() {
        return Err(AppError::Validation("headword cannot be empty".to_string()));
    }
    Ok(headword)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/classify
///
/// Deterministic template choice for a headword. No generation call.
pub async fn handle_classify(
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, AppError> {
    let part_of_speech = request.part_of_speech.parse::<PartOfSpeech>()?;
    let classification = classify(request.headword.trim(), part_of_speech)?;
    let template_directive = template_directive(&classification);

    Ok(Json(ClassifyResponse {
        classification,
        template_directive,
    }))
}

/// POST /api/v1/exemplars
///
/// Previews the few-shot exemplars a generation call would use.
pub async fn handle_exemplars(
    State(state): State<AppState>,
    Json(request): Json<ExemplarsRequest>,
) -> Result<Json<ExemplarSet>, AppError> {
    let headword = require_headword(&request.headword)?;
    let part_of_speech = request.part_of_speech.parse::<PartOfSpeech>()?;
    let max_count = request.max_count.unwrap_or(state.config.max_exemplars);

    let snapshot = state.snapshot().await;
    let exemplars = match classify_if_inflected(headword, part_of_speech)? {
        Some(classification) => select_exemplars(&snapshot, &classification, max_count),
        None => select_exemplars_by_part_of_speech(&snapshot, headword, part_of_speech, max_count),
    };
    Ok(Json(exemplars))
}

/// POST /api/v1/generate
///
/// Returns the verified entry if the headword is already in the ground truth;
/// otherwise drafts one. Drafts are not stored until approved.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<WordRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let word = request.to_word()?;
    let snapshot = state.snapshot().await;

    if !request.regenerate {
        if let Some(entry) = snapshot.current(&word.headword) {
            return Ok(Json(GenerateResponse::Verified {
                entry: entry.clone(),
            }));
        }
    }

    let draft = generate_entry(
        state.llm.as_ref(),
        &snapshot,
        &word,
        state.config.max_exemplars,
    )
    .await?;

    Ok(Json(GenerateResponse::Draft { draft }))
}

/// POST /api/v1/sandbox
///
/// Three SOV usage sentences to copy into the entry under review.
pub async fn handle_sandbox(
    State(state): State<AppState>,
    Json(request): Json<WordRequest>,
) -> Result<Json<SandboxResult>, AppError> {
    let word = request.to_word()?;
    let result = generate_sandbox(state.llm.as_ref(), &word).await?;
    Ok(Json(result))
}

/// POST /api/v1/sandbox/render
///
/// Wraps a sentence the reviewer accepted in `{{ux|kn|...}}` markup.
pub async fn handle_render_usage(
    Json(request): Json<RenderUsageRequest>,
) -> Result<Json<RenderUsageResponse>, AppError> {
    if request.sentence.trim().is_empty() {
        return Err(AppError::Validation("sentence cannot be empty".to_string()));
    }
    let usage = match request.translation.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => render_usage_template_with_translation(&request.sentence, t),
        _ => render_usage_template(&request.sentence),
    };
    Ok(Json(RenderUsageResponse { usage }))
}
