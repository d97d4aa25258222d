//! GET /test — verifies the model path end to end.
//!
//! This route never returns a non-200 status: failures are reported in the
//! body as `{error}` so deploy checks can always read a JSON payload.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::warn;

use crate::core::app_state::AppState;
use crate::error_handler::AppError;

/// Question sent through the resolved model.
pub const TEST_QUESTION: &str = "What is 2+2?";

/// Response payload: either the answered question or an error message.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TestResponse {
    Answered {
        question: &'static str,
        answer: String,
    },
    Failed {
        error: String,
    },
}

/// Handler: GET /test
pub async fn smoke_test(State(state): State<Arc<AppState>>) -> Json<TestResponse> {
    match run(&state).await {
        Ok(answer) => Json(TestResponse::Answered {
            question: TEST_QUESTION,
            answer,
        }),
        Err(err) => {
            warn!(error = %err, "test route failed");
            Json(TestResponse::Failed {
                error: err.to_string(),
            })
        }
    }
}

async fn run(state: &AppState) -> Result<String, AppError> {
    let model = state.resolver.resolve().await?;
    let raw = model.generate(TEST_QUESTION).await?;
    Ok(raw.trim().to_string())
}
