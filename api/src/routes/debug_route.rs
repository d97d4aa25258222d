//! GET /debug — process introspection for quick deploy checks.

use std::path::Path;
use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::app_state::AppState;

/// Response payload for the debug route.
#[derive(Debug, Serialize)]
pub struct DebugResponse {
    /// Whether a Gemini credential was configured at boot.
    pub api_key_exists: bool,
    /// Number of retained interaction records.
    pub question_history: usize,
    /// Whether a model handle is bound.
    pub model_initialized: bool,
    pub templates_dir_exists: bool,
    pub static_dir_exists: bool,
}

/// Handler: GET /debug
pub async fn debug_info(State(state): State<Arc<AppState>>) -> Json<DebugResponse> {
    Json(DebugResponse {
        api_key_exists: state.api_key_configured,
        question_history: state.history.len(),
        model_initialized: state.resolver.is_resolved(),
        templates_dir_exists: Path::new("templates").is_dir(),
        static_dir_exists: Path::new("static").is_dir(),
    })
}
