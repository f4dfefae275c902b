pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::analytics::handlers;
use crate::errors::AppError;
use crate::reminders::handlers as reminder_handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analytics API
        .route(
            "/api/v1/analytics/mood-trend",
            get(handlers::handle_mood_trend).post(handlers::handle_analyze_moods),
        )
        .route("/api/v1/analytics/task-mood", post(handlers::handle_task_mood))
        // Reminders API
        .route(
            "/api/v1/reminders/due",
            post(reminder_handlers::handle_due_reminders),
        )
        .fallback(not_found)
        .with_state(state)
}
