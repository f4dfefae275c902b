use serde::{Deserialize, Serialize};

use crate::models::mood::deserialize_optional_sentiment;

/// A task on the user's daily schedule board, optionally captioned with a
/// mood whose sentiment has been scored upstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyTask {
    pub task_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub mood_caption: Option<String>,
    /// `None` until the caption has been analyzed.
    #[serde(default, deserialize_with = "deserialize_optional_sentiment")]
    pub sentiment: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_fresh_task() {
        let task: DailyTask = serde_json::from_str(r#"{"taskId":"t1","title":"Write"}"#).unwrap();
        assert!(!task.done);
        assert_eq!(task.sentiment, None);
        assert_eq!(task.mood_caption, None);
    }

    #[test]
    fn test_null_sentiment() {
        let task: DailyTask = serde_json::from_str(
            r#"{"taskId":"t2","title":"Gym","done":true,"moodCaption":"tired","sentiment":null}"#,
        )
        .unwrap();
        assert!(task.done);
        assert_eq!(task.sentiment, None);
    }

    #[test]
    fn test_string_sentiment_is_parsed() {
        let task: DailyTask =
            serde_json::from_str(r#"{"taskId":"t3","sentiment":"0.5"}"#).unwrap();
        assert_eq!(task.sentiment, Some(0.5));
    }

    #[test]
    fn test_unusable_sentiment_is_unscored() {
        for raw in [r#""calm""#, r#""NaN""#, "true", "[0.4]"] {
            let body = format!(r#"{{"taskId":"t4","sentiment":{raw}}}"#);
            let task: DailyTask = serde_json::from_str(&body).unwrap();
            assert_eq!(task.sentiment, None, "scored {raw}");
        }
    }
}
