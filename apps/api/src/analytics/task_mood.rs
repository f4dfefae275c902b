use serde::Serialize;

use crate::analytics::buckets::MoodBucket;
use crate::models::DailyTask;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TaskMoodRow {
    pub bucket: MoodBucket,
    pub label: &'static str,
    pub done: usize,
    pub not_done: usize,
}

/// Task completion grouped by the sentiment of each task's mood caption.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TaskMoodBreakdown {
    /// Always Positive, Neutral, Negative in that order.
    pub rows: Vec<TaskMoodRow>,
    pub unscored: usize,
}

const ROW_ORDER: [MoodBucket; 3] = [MoodBucket::Positive, MoodBucket::Neutral, MoodBucket::Negative];

pub fn task_mood_breakdown(tasks: &[DailyTask]) -> TaskMoodBreakdown {
    let mut rows: Vec<TaskMoodRow> = ROW_ORDER
        .iter()
        .map(|bucket| TaskMoodRow {
            bucket: *bucket,
            label: bucket.label(),
            done: 0,
            not_done: 0,
        })
        .collect();
    let mut unscored = 0;

    for task in tasks {
        let Some(sentiment) = task.sentiment.filter(|s| !s.is_nan()) else {
            unscored += 1;
            continue;
        };
        let bucket = MoodBucket::classify(sentiment);
        if let Some(row) = rows.iter_mut().find(|r| r.bucket == bucket) {
            if task.done {
                row.done += 1;
            } else {
                row.not_done += 1;
            }
        }
    }

    TaskMoodBreakdown { rows, unscored }
}
