use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use gemini_service::{GenerateError, LlmError, ResolveError};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Llm(#[from] LlmError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request ---
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Every candidate model failed its smoke test; no answer is possible.
    #[error("no working model: every candidate failed its smoke test")]
    NoWorkingModel,

    /// Generation failed after resolution; upstream message propagated as-is.
    #[error("{0}")]
    Generation(String),

    /// Dashboard template failed to render.
    #[error("template error: {0}")]
    Template(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // startup-only
            AppError::Llm(_) => StatusCode::INTERNAL_SERVER_ERROR,

            // 4xx
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,

            // upstream faults
            AppError::NoWorkingModel | AppError::Generation(_) => StatusCode::BAD_GATEWAY,

            // 5xx
            AppError::Bind(_) | AppError::Server(_) | AppError::Template(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Llm(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::NoWorkingModel => "NO_WORKING_MODEL",
            AppError::Generation(_) => "GENERATION_FAILED",
            AppError::Template(_) => "TEMPLATE_ERROR",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NoWorkingModel => AppError::NoWorkingModel,
            // `ResolveError` is `#[non_exhaustive]`; unreachable today.
            _ => AppError::NoWorkingModel,
        }
    }
}

/// Generation failures keep their upstream message for the caller.
impl From<GenerateError> for AppError {
    fn from(err: GenerateError) -> Self {
        AppError::Generation(err.to_string())
    }
}
