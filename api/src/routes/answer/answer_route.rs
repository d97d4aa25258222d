//! POST /api/ — answers an assignment question, optional file upload.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, State},
};
use tracing::info;

use crate::core::{app_state::AppState, orchestrator};
use crate::error_handler::{AppError, AppResult};
use crate::routes::answer::answer_response::AnswerResponse;

/// Handler: POST /api/
///
/// Multipart form fields:
/// - `question` (required): the question text
/// - `file` (optional): binary upload, scanned for a pre-computed answer
///   when it is a ZIP archive
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/api/ \
///   -F 'question=What is the capital of France?' \
///   -F 'file=@submission.zip'
/// ```
pub async fn answer_question(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> AppResult<Json<AnswerResponse>> {
    let mut question: Option<String> = None;
    let mut file: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("question") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                question = Some(text);
            }
            Some("file") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if !bytes.is_empty() {
                    file = Some(bytes.to_vec());
                }
            }
            _ => {}
        }
    }

    let question = question
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("missing form field: question".into()))?;

    info!(question = %question, has_file = file.is_some(), "received question");

    let outcome = orchestrator::answer_question(&state, &question, file.as_deref()).await?;

    Ok(Json(AnswerResponse {
        answer: outcome.answer,
    }))
}
