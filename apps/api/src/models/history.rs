use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::analysis::AnalysisResult;
use crate::models::career::CareerInput;
use crate::report::ReportData;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalysisHistoryRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub career_input: Json<CareerInput>,
    pub analysis: Json<AnalysisResult>,
    pub report: Option<Json<ReportData>>,
    pub created_at: DateTime<Utc>,
}
