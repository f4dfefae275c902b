// Mood analytics: trend statistics over a mood history, task/mood breakdowns.
// Everything below `handlers` is pure and synchronous.

pub mod buckets;
pub mod handlers;
pub mod moving_average;
pub mod task_mood;
pub mod trend;

pub use trend::{MoodTrendAnalyzer, MoodTrendReport};
