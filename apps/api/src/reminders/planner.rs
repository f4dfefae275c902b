//! Break reminder planner.
//!
//! Polled once per minute (or more often) with the user's local time; reports
//! which break notifications are due. Each notification fires at most once per
//! calendar day per break time, tracked through the caller's key set.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;
use thiserror::Error;

/// How far ahead of a break the heads-up reminder fires.
pub const REMINDER_LEAD_MINUTES: i64 = 5;

#[derive(Debug, Error, PartialEq)]
pub enum BreakTimeError {
    #[error("break time '{0}' must be in HH:MM 24-hour format")]
    Format(String),
}

/// A time of day, minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BreakTime(NaiveTime);

impl BreakTime {
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    fn matches(&self, time: NaiveTime) -> bool {
        self.0.hour() == time.hour() && self.0.minute() == time.minute()
    }
}

impl FromStr for BreakTime {
    type Err = BreakTimeError;

    /// Accepts `H:MM` or `HH:MM`, hour 0-23.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || BreakTimeError::Format(s.to_string());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(err)?;

        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(hour) || hour.len() > 2 || !all_digits(minute) || minute.len() != 2 {
            return Err(err());
        }

        let hour: u32 = hour.parse().map_err(|_| err())?;
        let minute: u32 = minute.parse().map_err(|_| err())?;
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(BreakTime)
            .ok_or_else(err)
    }
}

impl fmt::Display for BreakTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Heads-up a few minutes before the break.
    Reminder,
    /// The break starts now.
    Start,
}

impl NotificationKind {
    fn key_prefix(&self) -> &'static str {
        match self {
            NotificationKind::Reminder => "reminder",
            NotificationKind::Start => "start",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BreakNotification {
    pub kind: NotificationKind,
    pub time: String,
    pub key: String,
    pub label: String,
}

/// Parses and de-duplicates break times, keeping them sorted.
pub fn parse_break_times<S: AsRef<str>>(raw: &[S]) -> Result<Vec<BreakTime>, BreakTimeError> {
    let unique: BTreeSet<BreakTime> = raw
        .iter()
        .map(|s| s.as_ref().parse())
        .collect::<Result<_, _>>()?;
    Ok(unique.into_iter().collect())
}

/// Returns the notifications due at `now` that have not fired today, and
/// records their keys in `notified`.
pub fn due_notifications(
    now: NaiveDateTime,
    breaks: &[BreakTime],
    notified: &mut BTreeSet<String>,
) -> Vec<BreakNotification> {
    let today = now.date().format("%Y-%m-%d").to_string();
    let current = now.time();
    let (lead, _) = current.overflowing_add_signed(Duration::minutes(REMINDER_LEAD_MINUTES));

    let mut due = Vec::new();
    for break_time in breaks {
        let time = break_time.to_string();

        if break_time.matches(lead) {
            let key = format!("{}_{}_{}", NotificationKind::Reminder.key_prefix(), today, time);
            if notified.insert(key.clone()) {
                due.push(BreakNotification {
                    kind: NotificationKind::Reminder,
                    label: format!(
                        "Upcoming break at {time} in {REMINDER_LEAD_MINUTES} minutes!"
                    ),
                    time: time.clone(),
                    key,
                });
            }
        }

        if break_time.matches(current) {
            let key = format!("{}_{}_{}", NotificationKind::Start.key_prefix(), today, time);
            if notified.insert(key.clone()) {
                due.push(BreakNotification {
                    kind: NotificationKind::Start,
                    label: format!("It's {time}! Time for your mindful break"),
                    time,
                    key,
                });
            }
        }
    }

    due
}
