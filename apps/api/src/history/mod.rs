//! Analysis history: every analysis a user ran, with its report when one was bought.

pub mod handlers;

use anyhow::Result;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::analysis::AnalysisResult;
use crate::models::career::CareerInput;
use crate::models::history::AnalysisHistoryRow;
use crate::report::ReportData;

/// Stores one analysis run. Returns the new row id.
pub async fn save_analysis_history(
    pool: &PgPool,
    user_id: Uuid,
    career_input: &CareerInput,
    analysis: &AnalysisResult,
    report: Option<&ReportData>,
) -> Result<Uuid> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO analysis_history (id, user_id, career_input, analysis, report)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(Json(career_input))
    .bind(Json(analysis))
    .bind(report.map(Json))
    .execute(pool)
    .await?;

    info!("Saved analysis {id} for user {user_id}");
    Ok(id)
}

/// All runs for a user, newest first.
pub async fn fetch_analysis_history(pool: &PgPool, user_id: Uuid) -> Result<Vec<AnalysisHistoryRow>> {
    let rows = sqlx::query_as::<_, AnalysisHistoryRow>(
        "SELECT * FROM analysis_history WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// The most recent run for a user, if any.
pub async fn fetch_latest_analysis(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<AnalysisHistoryRow>> {
    let row = sqlx::query_as::<_, AnalysisHistoryRow>(
        "SELECT * FROM analysis_history WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Deletes one run owned by `user_id`. Returns whether a row was removed.
pub async fn delete_analysis_history(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM analysis_history WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
