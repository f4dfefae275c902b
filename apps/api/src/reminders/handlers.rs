//! Axum route handlers for break reminders.

use std::collections::BTreeSet;

use axum::Json;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::reminders::{due_notifications, parse_break_times, BreakNotification};

#[derive(Debug, Deserialize)]
pub struct DueRemindersRequest {
    pub break_times: Vec<String>,
    /// The user's local wall-clock time, `YYYY-MM-DDTHH:MM[:SS]`.
    pub now: String,
    #[serde(default)]
    pub notified: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DueRemindersResponse {
    pub notifications: Vec<BreakNotification>,
    pub notified: Vec<String>,
}

/// POST /api/v1/reminders/due
///
/// Stateless: the caller keeps the `notified` keys between polls and sends
/// them back on the next call.
pub async fn handle_due_reminders(
    AppJson(request): AppJson<DueRemindersRequest>,
) -> Result<Json<DueRemindersResponse>, AppError> {
    let breaks = parse_break_times(&request.break_times)
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let now = parse_local_time(&request.now)?;

    let mut notified: BTreeSet<String> = request.notified.into_iter().collect();
    let notifications = due_notifications(now, &breaks, &mut notified);

    Ok(Json(DueRemindersResponse {
        notifications,
        notified: notified.into_iter().collect(),
    }))
}

fn parse_local_time(raw: &str) -> Result<NaiveDateTime, AppError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map_err(|_| AppError::Validation(format!("now '{raw}' must be YYYY-MM-DDTHH:MM[:SS]")))
}
