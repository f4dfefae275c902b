use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{de, Deserialize, Deserializer, Serialize};

/// A single mood journal entry as recorded by the mood backend.
/// The sentiment score is produced upstream; it is never computed here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodEntry {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<FixedOffset>,
    #[serde(default)]
    pub message: String,
    #[serde(deserialize_with = "deserialize_sentiment")]
    pub sentiment: f64,
}

impl MoodEntry {
    /// Calendar day of the entry in the offset it was recorded with.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// Envelope returned by `GET /mood-history`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoodHistory {
    #[serde(default)]
    pub moods: Vec<MoodEntry>,
}

/// Accepts RFC 3339 timestamps, and naive ones (read as UTC).
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{raw}'")))
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts);
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
        .map(|naive| naive.and_utc().fixed_offset())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// The mood backend has been seen sending sentiment as a numeric string.
/// `"NaN"` and `"inf"` parse as floats but are not scores, so they are rejected.
pub(crate) fn deserialize_sentiment<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n,
        NumberOrString::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("sentiment '{s}' is not a number")))?,
    };
    if !value.is_finite() {
        return Err(de::Error::custom(format!("sentiment '{value}' is not finite")));
    }
    Ok(value)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientScore {
    Number(f64),
    Text(String),
    Other(de::IgnoredAny),
}

/// Optional score for tasks: anything that is not a finite number (or a
/// numeric string) reads as "not yet scored" instead of failing the request.
pub(crate) fn deserialize_optional_sentiment<'de, D>(
    deserializer: D,
) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let score = match Option::<LenientScore>::deserialize(deserializer)? {
        Some(LenientScore::Number(n)) => Some(n),
        Some(LenientScore::Text(s)) => s.trim().parse::<f64>().ok(),
        Some(LenientScore::Other(_)) | None => None,
    };
    Ok(score.filter(|s| s.is_finite()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_rfc3339_and_keeps_offset() {
        let entry: MoodEntry = serde_json::from_str(
            r#"{"timestamp":"2024-03-01T23:30:00-05:00","message":"ok","sentiment":0.4}"#,
        )
        .unwrap();
        assert_eq!(entry.date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(entry.timestamp.offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn test_naive_timestamp_is_utc() {
        let entry: MoodEntry =
            serde_json::from_str(r#"{"timestamp":"2024-03-01T08:15:00","sentiment":0.1}"#)
                .unwrap();
        assert_eq!(entry.timestamp.offset().local_minus_utc(), 0);
        assert_eq!(entry.message, "");
    }

    #[test]
    fn test_sentiment_as_string() {
        let entry: MoodEntry = serde_json::from_str(
            r#"{"timestamp":"2024-03-01T08:15:00Z","message":"meh","sentiment":"0.5"}"#,
        )
        .unwrap();
        assert_eq!(entry.sentiment, 0.5);
    }

    #[test]
    fn test_non_numeric_sentiment_rejected() {
        let result = serde_json::from_str::<MoodEntry>(
            r#"{"timestamp":"2024-03-01T08:15:00Z","sentiment":"happy"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_non_finite_sentiment_rejected() {
        for raw in ["\"NaN\"", "\"inf\"", "\"-infinity\""] {
            let body = format!(r#"{{"timestamp":"2024-03-01T08:15:00Z","sentiment":{raw}}}"#);
            assert!(serde_json::from_str::<MoodEntry>(&body).is_err(), "accepted {raw}");
        }
    }

    #[test]
    fn test_bad_timestamp_rejected() {
        let result =
            serde_json::from_str::<MoodEntry>(r#"{"timestamp":"yesterday","sentiment":0.2}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_history_without_moods_is_empty() {
        let history: MoodHistory = serde_json::from_str("{}").unwrap();
        assert!(history.moods.is_empty());
    }
}
