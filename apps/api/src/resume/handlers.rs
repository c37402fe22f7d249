//! Axum route handlers for the Resume API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::career::CareerInput;
use crate::resume::extract::extract_text;
use crate::resume::parser::parse_resume;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct ParseTextRequest {
    pub text: String,
}

/// POST /api/v1/resume/parse
///
/// Multipart upload with the resume in the `file` field.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CareerInput>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        upload = Some((file_name, content_type, bytes));
        break;
    }

    let (file_name, content_type, bytes) = upload
        .ok_or_else(|| AppError::Validation(format!("Missing '{FILE_FIELD}' field")))?;

    // pdf-extract is CPU-bound and may panic on malformed files.
    let text = tokio::task::spawn_blocking(move || {
        extract_text(file_name.as_deref(), content_type.as_deref(), &bytes)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Resume extraction task failed: {e}")))??;

    let input = parse_resume(&text, &state.llm).await?;
    Ok(Json(input))
}

/// POST /api/v1/resume/parse-text
pub async fn handle_parse_text(
    State(state): State<AppState>,
    Json(request): Json<ParseTextRequest>,
) -> Result<Json<CareerInput>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text must not be empty".to_string()));
    }
    let input = parse_resume(&request.text, &state.llm).await?;
    Ok(Json(input))
}
