use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::analysis::digest::DigestHighlight;
use crate::errors::AppError;
use crate::history::{delete_analysis_history, fetch_analysis_history, fetch_latest_analysis};
use crate::models::history::AnalysisHistoryRow;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// GET /api/v1/history
pub async fn handle_list_history(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<AnalysisHistoryRow>>, AppError> {
    let rows = fetch_analysis_history(&state.db, params.user_id).await?;
    Ok(Json(rows))
}

/// DELETE /api/v1/history/:id
pub async fn handle_delete_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    if !delete_analysis_history(&state.db, id, params.user_id).await? {
        return Err(AppError::NotFound(format!("Analysis {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/history/digest
///
/// Level and top skill gaps of the latest stored analysis, as the daily digest shows them.
pub async fn handle_digest(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<DigestHighlight>, AppError> {
    let latest = fetch_latest_analysis(&state.db, params.user_id).await?;
    let analysis = latest.as_ref().map(|row| &row.analysis.0);
    Ok(Json(DigestHighlight::from_analysis(analysis)))
}
