//! Health Handler

use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::infrastructure::http::dto::HealthResponse;
use crate::infrastructure::http::state::AppState;

/// 健康检查
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "octave",
        version: env!("CARGO_PKG_VERSION"),
        llm_configured: state.llm_configured,
        tts_configured: state.tts_configured,
        timestamp: Utc::now().to_rfc3339(),
    })
}
