//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::analysis::composite::{assess_skill, DecisionSignals, SkillAssessment};
use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::models::career::CareerInput;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub career_input: CareerInput,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub analysis: AnalysisResult,
    pub decision_signals: DecisionSignals,
    pub skill_gaps: Vec<SkillAssessment>,
}

impl AnalysisResponse {
    pub fn build(input: &CareerInput, analysis: AnalysisResult) -> Self {
        let decision_signals = DecisionSignals::derive(input, &analysis);
        let skill_gaps = analysis
            .skills
            .iter()
            .map(|skill| assess_skill(skill, &analysis))
            .collect();
        Self {
            analysis,
            decision_signals,
            skill_gaps,
        }
    }
}

/// POST /api/v1/analysis
///
/// Runs the connector fan-out and scoring for one career profile. Always
/// answers with a complete analysis; connector outages only change `sources`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let input = request.career_input.with_defaults();
    let mut rng = StdRng::from_entropy();

    let analysis = state.engine.analyze(&input, &mut rng).await;

    Ok(Json(AnalysisResponse::build(&input, analysis)))
}
