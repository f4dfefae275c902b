use std::sync::Arc;

use crate::analytics::MoodTrendAnalyzer;
use crate::mood_client::MoodSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Mood history provider. Default: `MoodClient` against `MOOD_API_URL`.
    pub mood_source: Arc<dyn MoodSource>,
    /// Analyzer built with the configured moving-average window.
    pub analyzer: MoodTrendAnalyzer,
}
