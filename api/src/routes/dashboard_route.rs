//! GET /dashboard — recent and frequent questions, rendered as HTML.

use std::sync::Arc;

use axum::{extract::State, response::Html};
use minijinja::{Environment, context};
use serde::Serialize;

use crate::core::app_state::AppState;
use crate::error_handler::{AppError, AppResult};

const DASHBOARD_TEMPLATE: &str = include_str!("../../templates/dashboard.html");

/// How many most-recent records the dashboard shows.
const RECENT_LIMIT: usize = 10;

/// How many most-frequent questions the dashboard shows.
const FREQUENT_LIMIT: usize = 5;

#[derive(Debug, Serialize)]
struct RecentRow {
    question: String,
    answer: String,
    timestamp: String,
    had_attached_file: bool,
}

#[derive(Debug, Serialize)]
struct FrequentRow {
    question: String,
    count: usize,
}

/// Handler: GET /dashboard
pub async fn dashboard(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let recent: Vec<RecentRow> = state
        .history
        .recent(RECENT_LIMIT)
        .into_iter()
        .map(|r| RecentRow {
            question: r.question,
            answer: r.answer,
            timestamp: r
                .timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            had_attached_file: r.had_attached_file,
        })
        .collect();

    let frequent: Vec<FrequentRow> = state
        .history
        .most_frequent(FREQUENT_LIMIT)
        .into_iter()
        .map(|(question, count)| FrequentRow { question, count })
        .collect();

    let env = Environment::new();
    let html = env
        .render_str(DASHBOARD_TEMPLATE, context! { recent, frequent })
        .map_err(|e| AppError::Template(e.to_string()))?;

    Ok(Html(html))
}
