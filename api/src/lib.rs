//! HTTP surface for the assignment helper.
//!
//! Routes:
//! - `GET  /`          — service health summary
//! - `GET  /test`      — model smoke test (always 200)
//! - `POST /api/`      — answer a question, optional file upload
//! - `GET  /dashboard` — recent/frequent questions as HTML
//! - `GET  /debug`     — process introspection

use std::{env, sync::Arc};

mod core;
mod error_handler;
mod routes;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use crate::core::app_state::AppState;
pub use crate::error_handler::{AppError, AppResult};

use crate::routes::{
    answer::answer_route::answer_question, dashboard_route::dashboard, debug_route::debug_info,
    health_route::health_check, test_route::smoke_test,
};

/// Default bind address when `API_ADDRESS` is unset.
const DEFAULT_ADDRESS: &str = "127.0.0.1:8000";

/// Builds the application router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/test", get(smoke_test))
        .route("/api/", post(answer_question))
        .route("/dashboard", get(dashboard))
        .route("/debug", get(debug_info))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Loads state from the environment, binds, and serves until ctrl-c.
pub async fn start() -> Result<(), AppError> {
    let state = Arc::new(AppState::from_env()?);
    let app = router(state);

    let addr = env::var("API_ADDRESS").unwrap_or_else(|_| DEFAULT_ADDRESS.into());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(AppError::Bind)?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
