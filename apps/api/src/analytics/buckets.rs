//! Sentiment thresholds.
//!
//! Three independent threshold sets are in use and are kept separate:
//! - distribution buckets: positive above 0.2, negative below -0.2
//! - positive streaks: strictly above 0.0
//! - display tiers: happy above 0.5, sad below -0.5

use serde::{Deserialize, Serialize};

pub const POSITIVE_BUCKET_THRESHOLD: f64 = 0.2;
pub const NEGATIVE_BUCKET_THRESHOLD: f64 = -0.2;
pub const STREAK_THRESHOLD: f64 = 0.0;
pub const HAPPY_TIER_THRESHOLD: f64 = 0.5;
pub const SAD_TIER_THRESHOLD: f64 = -0.5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MoodBucket {
    Positive,
    Neutral,
    Negative,
}

impl MoodBucket {
    /// Boundaries are neutral: exactly 0.2 or -0.2 is `Neutral`.
    pub fn classify(sentiment: f64) -> Self {
        if sentiment > POSITIVE_BUCKET_THRESHOLD {
            MoodBucket::Positive
        } else if sentiment < NEGATIVE_BUCKET_THRESHOLD {
            MoodBucket::Negative
        } else {
            MoodBucket::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MoodBucket::Positive => "Positive",
            MoodBucket::Neutral => "Neutral",
            MoodBucket::Negative => "Negative",
        }
    }
}

/// Coarse display class used for icons and axis ticks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MoodTier {
    Happy,
    Neutral,
    Sad,
}

impl MoodTier {
    pub fn classify(sentiment: f64) -> Self {
        if sentiment > HAPPY_TIER_THRESHOLD {
            MoodTier::Happy
        } else if sentiment < SAD_TIER_THRESHOLD {
            MoodTier::Sad
        } else {
            MoodTier::Neutral
        }
    }
}

pub fn extends_streak(sentiment: f64) -> bool {
    sentiment > STREAK_THRESHOLD
}
