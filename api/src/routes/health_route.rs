//! GET / — service health summary.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::app_state::AppState;

/// Response payload for the health route.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    /// Resolved model identifier, or `"unresolved"` before first use.
    pub model: String,
}

/// Handler: GET /
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let model = state
        .resolver
        .resolved_id()
        .unwrap_or_else(|| "unresolved".into());

    Json(HealthResponse {
        status: "ok",
        service: "Assignment Helper API",
        model,
    })
}
