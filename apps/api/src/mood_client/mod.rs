//! Mood client: reads a user's mood history from the external mood backend.
//!
//! The backend owns accounts, tokens and sentiment scoring. This service only
//! forwards the caller's bearer token and never stores it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::MoodHistory;

const MOOD_HISTORY_PATH: &str = "/mood-history";
const MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Error)]
pub enum MoodClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Mood backend error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Mood backend rejected the token")]
    Unauthorized,

    #[error("Mood backend denied access")]
    Forbidden,

    #[error("Malformed mood history: {0}")]
    Parse(#[from] serde_json::Error),
}

impl MoodClientError {
    /// Transport failures, 429 and 5xx are worth another attempt.
    fn is_retryable(&self) -> bool {
        match self {
            MoodClientError::Http(_) => true,
            MoodClientError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Where mood histories come from. `AppState` carries an `Arc<dyn MoodSource>`
/// so handlers can be exercised without a live backend.
#[async_trait]
pub trait MoodSource: Send + Sync {
    async fn fetch_history(&self, bearer_token: &str) -> Result<MoodHistory, MoodClientError>;
}

#[derive(Debug, Deserialize)]
struct BackendError {
    error: String,
}

#[derive(Clone)]
pub struct MoodClient {
    client: Client,
    base_url: String,
}

impl MoodClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, MoodClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn history_url(&self) -> String {
        format!("{}{}", self.base_url, MOOD_HISTORY_PATH)
    }

    /// GET /mood-history on behalf of the token holder.
    /// Makes up to `MAX_ATTEMPTS` requests, backing off 1s then 2s between
    /// attempts that failed on 429, 5xx or transport errors.
    pub async fn get_history(&self, bearer_token: &str) -> Result<MoodHistory, MoodClientError> {
        let mut attempt = 1;

        loop {
            match self.try_get_history(bearer_token).await {
                Err(e) if e.is_retryable() && attempt < MAX_ATTEMPTS => {
                    let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                    warn!(
                        "Mood history attempt {} failed ({}), retrying after {}ms...",
                        attempt,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn try_get_history(&self, bearer_token: &str) -> Result<MoodHistory, MoodClientError> {
        let response = self
            .client
            .get(self.history_url())
            .bearer_auth(bearer_token)
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED => return Err(MoodClientError::Unauthorized),
            StatusCode::FORBIDDEN => return Err(MoodClientError::Forbidden),
            _ => {}
        }

        let body = response.text().await?;

        if !status.is_success() {
            warn!("Mood backend returned {}: {}", status, body);
            let message = serde_json::from_str::<BackendError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(MoodClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let history = parse_history(&body)?;
        debug!("Fetched mood history: {} entries", history.moods.len());
        Ok(history)
    }
}

#[async_trait]
impl MoodSource for MoodClient {
    async fn fetch_history(&self, bearer_token: &str) -> Result<MoodHistory, MoodClientError> {
        self.get_history(bearer_token).await
    }
}

fn parse_history(body: &str) -> Result<MoodHistory, MoodClientError> {
    if body.trim().is_empty() {
        return Ok(MoodHistory::default());
    }
    Ok(serde_json::from_str(body)?)
}
