pub mod mood;
pub mod task;

pub use mood::{MoodEntry, MoodHistory};
pub use task::DailyTask;
