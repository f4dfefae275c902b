use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::analytics::trend::DEFAULT_MOVING_AVERAGE_WINDOW;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the mood backend that serves `/mood-history`.
    pub mood_api_url: String,
    pub mood_api_timeout: Duration,
    pub moving_average_window: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let moving_average_window =
            parse_env_or("MOVING_AVERAGE_WINDOW", DEFAULT_MOVING_AVERAGE_WINDOW)?;
        if moving_average_window == 0 {
            bail!("MOVING_AVERAGE_WINDOW must be at least 1");
        }

        Ok(Config {
            mood_api_url: require_env("MOOD_API_URL")?,
            mood_api_timeout: Duration::from_secs(parse_env_or("MOOD_API_TIMEOUT_SECS", 30u64)?),
            moving_average_window,
            port: parse_env_or("PORT", 8080u16)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_or_default_when_unset() {
        let value: u16 = parse_env_or("MOODTREND_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(value, 8080);
    }

    #[test]
    fn test_parse_env_or_rejects_garbage() {
        std::env::set_var("MOODTREND_TEST_BAD_WINDOW", "seven");
        let result: Result<usize> = parse_env_or("MOODTREND_TEST_BAD_WINDOW", 7);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_env_or_reads_value() {
        std::env::set_var("MOODTREND_TEST_TIMEOUT", " 12 ");
        let result: u64 = parse_env_or("MOODTREND_TEST_TIMEOUT", 30).unwrap();
        assert_eq!(result, 12);
    }
}
