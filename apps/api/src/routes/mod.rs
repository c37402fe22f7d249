pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::history::handlers as history;
use crate::report::handlers as report;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis
        .route("/api/v1/analysis", post(analysis::handle_analyze))
        .route("/api/v1/report", post(report::handle_generate_report))
        // Resume intake
        .route("/api/v1/resume/parse", post(resume::handle_parse_resume))
        .route("/api/v1/resume/parse-text", post(resume::handle_parse_text))
        // History
        .route("/api/v1/history", get(history::handle_list_history))
        .route("/api/v1/history/digest", get(history::handle_digest))
        .route("/api/v1/history/:id", delete(history::handle_delete_history))
        .with_state(state)
}
