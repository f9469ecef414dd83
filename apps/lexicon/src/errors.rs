use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ground_truth::PersistError;
use crate::llm_client::LlmError;
use crate::morphology::{ClassifyError, PartOfSpeech};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Collaborator failures (generation service, persistence) carry the
/// collaborator's own error and message through to the caller.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported part of speech: {0} (only NOUN and VERB have inflection templates)")]
    UnsupportedPartOfSpeech(PartOfSpeech),

    #[error("Generation service unavailable: {0}")]
    GenerationUnavailable(#[from] LlmError),

    #[error("Persistence unavailable: {0}")]
    PersistenceUnavailable(#[from] PersistError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ClassifyError> for AppError {
    fn from(err: ClassifyError) -> Self {
        match err {
            ClassifyError::UnsupportedPartOfSpeech(pos) => AppError::UnsupportedPartOfSpeech(pos),
            other => AppError::Validation(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::UnsupportedPartOfSpeech(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNSUPPORTED_PART_OF_SPEECH",
            ),
            AppError::GenerationUnavailable(e) => {
                tracing::error!("Generation service error: {e}");
                (StatusCode::BAD_GATEWAY, "GENERATION_UNAVAILABLE")
            }
            AppError::PersistenceUnavailable(e) => {
                tracing::error!("Persistence error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "PERSISTENCE_UNAVAILABLE")
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}
