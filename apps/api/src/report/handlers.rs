//! Axum route handlers for the Report API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::analysis::composite::SCORE_MAX;
use crate::analysis::trend::TrendDelta;
use crate::errors::AppError;
use crate::history::{fetch_latest_analysis, save_analysis_history};
use crate::models::analysis::AnalysisResult;
use crate::models::career::CareerInput;
use crate::report::{generate_report, ReportData};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub career_input: CareerInput,
    pub analysis: AnalysisResult,
    /// When set, the previous run is used for the trend and this run is stored.
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub report: ReportData,
    pub trend: Option<TrendDelta>,
    pub history_id: Option<Uuid>,
}

/// POST /api/v1/report
pub async fn handle_generate_report(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    ensure_bounded(&request.analysis)?;
    let input = request.career_input.with_defaults();
    let analysis = request.analysis;

    let previous = match request.user_id {
        Some(user_id) => fetch_latest_analysis(&state.db, user_id)
            .await?
            .map(|row| row.analysis.0),
        None => None,
    };

    let report = generate_report(&state.llm, &input, &analysis, previous.as_ref()).await?;
    let trend = previous
        .as_ref()
        .map(|previous| TrendDelta::between(previous, &analysis));

    // The report is already paid for; a failed history write must not lose it.
    let history_id = match request.user_id {
        Some(user_id) => {
            match save_analysis_history(&state.db, user_id, &input, &analysis, Some(&report)).await
            {
                Ok(id) => Some(id),
                Err(e) => {
                    warn!("Failed to save analysis history for {user_id}: {e:#}");
                    None
                }
            }
        }
        None => None,
    };

    Ok(Json(ReportResponse {
        report,
        trend,
        history_id,
    }))
}

/// Client-supplied analyses must respect the same 0..=100 bounds the engine produces.
fn ensure_bounded(analysis: &AnalysisResult) -> Result<(), AppError> {
    let top_level = [
        ("marketPosition", analysis.market_position),
        ("techTrend", analysis.tech_trend),
        ("demandLevel", analysis.demand_level),
        ("overallScore", analysis.overall_score),
    ];
    if let Some((field, value)) = top_level.iter().find(|(_, v)| *v > SCORE_MAX) {
        return Err(AppError::Validation(format!(
            "{field} must be between 0 and {SCORE_MAX}, got {value}"
        )));
    }

    if let Some(skill) = analysis
        .skills
        .iter()
        .find(|s| s.score > SCORE_MAX || s.market_avg > SCORE_MAX)
    {
        return Err(AppError::Validation(format!(
            "Scores for skill '{}' must be between 0 and {SCORE_MAX}",
            skill.name
        )));
    }
    Ok(())
}
