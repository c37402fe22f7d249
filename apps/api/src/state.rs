use std::sync::Arc;

use sqlx::PgPool;

use crate::analysis::engine::AnalysisEngine;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    /// Connector fan-out and scoring. Stateless per request.
    pub engine: Arc<AnalysisEngine>,
}
