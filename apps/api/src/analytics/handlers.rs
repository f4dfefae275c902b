//! Axum route handlers for the Analytics API.

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::analytics::task_mood::{task_mood_breakdown, TaskMoodBreakdown};
use crate::analytics::{MoodTrendAnalyzer, MoodTrendReport};
use crate::errors::AppError;
use crate::extract::{AppJson, AppQuery};
use crate::models::{DailyTask, MoodEntry};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    /// Moving-average window; falls back to the configured default.
    pub window: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct MoodTrendRequest {
    #[serde(default)]
    pub moods: Vec<MoodEntry>,
}

#[derive(Debug, Deserialize)]
pub struct TaskMoodRequest {
    #[serde(default)]
    pub tasks: Vec<DailyTask>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analytics/mood-trend
///
/// Analyzes a mood history supplied by the caller.
pub async fn handle_analyze_moods(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<WindowQuery>,
    AppJson(request): AppJson<MoodTrendRequest>,
) -> Result<Json<MoodTrendReport>, AppError> {
    let analyzer = analyzer_for(&state, &query)?;
    Ok(Json(analyzer.analyze(&request.moods)))
}

/// GET /api/v1/analytics/mood-trend
///
/// Fetches the token holder's history from the mood backend and analyzes it.
pub async fn handle_mood_trend(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<WindowQuery>,
    headers: HeaderMap,
) -> Result<Json<MoodTrendReport>, AppError> {
    let analyzer = analyzer_for(&state, &query)?;
    let token = bearer_token(&headers)?;

    let history = state.mood_source.fetch_history(token).await?;
    info!("Analyzing {} mood entries from backend", history.moods.len());

    Ok(Json(analyzer.analyze(&history.moods)))
}

/// POST /api/v1/analytics/task-mood
///
/// Done / not-done task counts per sentiment bucket.
pub async fn handle_task_mood(
    AppJson(request): AppJson<TaskMoodRequest>,
) -> Result<Json<TaskMoodBreakdown>, AppError> {
    Ok(Json(task_mood_breakdown(&request.tasks)))
}

fn analyzer_for(state: &AppState, query: &WindowQuery) -> Result<MoodTrendAnalyzer, AppError> {
    match query.window {
        Some(0) => Err(AppError::Validation("window must be at least 1".to_string())),
        Some(window) => Ok(MoodTrendAnalyzer::new(window)),
        None => Ok(state.analyzer),
    }
}

/// Extracts the token from `Authorization: Bearer <token>`.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let (scheme, token) = value.trim().split_once(' ').ok_or(AppError::Unauthorized)?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AppError::Unauthorized);
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(auth: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(auth).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        let headers = headers_with("Bearer abc.def");
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def");
        let headers = headers_with("bearer xyz");
        assert_eq!(bearer_token(&headers).unwrap(), "xyz");
    }

    #[test]
    fn test_bearer_token_missing_or_malformed() {
        assert!(matches!(
            bearer_token(&HeaderMap::new()),
            Err(AppError::Unauthorized)
        ));
        assert!(bearer_token(&headers_with("Basic dXNlcg==")).is_err());
        assert!(bearer_token(&headers_with("Bearer ")).is_err());
        assert!(bearer_token(&headers_with("token")).is_err());
    }
}
