//! Mood trend analytics: turns a mood history into summary statistics and a
//! chart-ready series. Pure and synchronous; never fails.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::analytics::buckets::{extends_streak, MoodBucket, MoodTier};
use crate::analytics::moving_average::trailing_moving_average;
use crate::models::MoodEntry;

pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 7;

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct MoodDistribution {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl MoodDistribution {
    pub fn record(&mut self, sentiment: f64) {
        match MoodBucket::classify(sentiment) {
            MoodBucket::Positive => self.positive += 1,
            MoodBucket::Neutral => self.neutral += 1,
            MoodBucket::Negative => self.negative += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    /// Percentage of entries in each bucket; all zero when empty.
    pub fn shares(&self) -> DistributionShares {
        let total = self.total();
        let pct = |count: usize| {
            if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            }
        };
        DistributionShares {
            positive: pct(self.positive),
            neutral: pct(self.neutral),
            negative: pct(self.negative),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DistributionShares {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

/// The entry behind a best/worst statistic, with its calendar day.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MoodDay {
    pub date: NaiveDate,
    pub entry: MoodEntry,
}

impl MoodDay {
    fn of(entry: &MoodEntry) -> Self {
        Self {
            date: entry.date(),
            entry: entry.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    fn of(change: f64) -> Self {
        if change > 0.0 {
            Trend::Up
        } else if change < 0.0 {
            Trend::Down
        } else {
            Trend::Flat
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub sentiment: f64,
    pub tier: MoodTier,
}

/// Everything the analytics view renders. Statistics that are undefined for
/// the given input are `None` and serialize as `null`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MoodTrendReport {
    pub entry_count: usize,
    pub average: Option<f64>,
    pub best_day: Option<MoodDay>,
    pub worst_day: Option<MoodDay>,
    pub distribution: MoodDistribution,
    pub distribution_shares: DistributionShares,
    pub longest_positive_streak: usize,
    pub recent_change: Option<f64>,
    pub recent_trend: Option<Trend>,
    pub series: Vec<SeriesPoint>,
    pub moving_average: Vec<f64>,
    pub moving_average_window: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct MoodTrendAnalyzer {
    moving_average_window: usize,
}

impl Default for MoodTrendAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_MOVING_AVERAGE_WINDOW)
    }
}

impl MoodTrendAnalyzer {
    pub fn new(moving_average_window: usize) -> Self {
        Self {
            moving_average_window: moving_average_window.max(1),
        }
    }

    /// Computes the report. Entries are expected oldest-first; if they are
    /// not, a stable chronological view is analyzed instead. The input is
    /// never mutated.
    pub fn analyze(&self, entries: &[MoodEntry]) -> MoodTrendReport {
        let mut view: Vec<&MoodEntry> = entries.iter().collect();
        if !is_chronological(entries) {
            debug!("Mood history out of order, sorting {} entries", entries.len());
            view.sort_by_key(|e| e.timestamp);
        }

        let mut distribution = MoodDistribution::default();
        let mut sum = 0.0;
        let mut best: Option<&MoodEntry> = None;
        let mut worst: Option<&MoodEntry> = None;
        let mut longest_streak = 0usize;
        let mut streak = 0usize;

        for entry in view.iter().copied() {
            let s = entry.sentiment;
            sum += s;
            distribution.record(s);

            // Strict comparisons keep the first occurrence on ties.
            match best {
                Some(b) if s <= b.sentiment || s.is_nan() => {}
                _ => best = Some(entry),
            }
            match worst {
                Some(w) if s >= w.sentiment || s.is_nan() => {}
                _ => worst = Some(entry),
            }

            if extends_streak(s) {
                streak += 1;
                longest_streak = longest_streak.max(streak);
            } else {
                streak = 0;
            }
        }

        let entry_count = view.len();
        let average = (entry_count > 0).then(|| sum / entry_count as f64);

        let recent_change = match view.as_slice() {
            [.., previous, last] => Some(last.sentiment - previous.sentiment),
            _ => None,
        };

        let series: Vec<SeriesPoint> = view
            .iter()
            .map(|e| SeriesPoint {
                date: e.date(),
                sentiment: e.sentiment,
                tier: MoodTier::classify(e.sentiment),
            })
            .collect();

        let sentiments: Vec<f64> = series.iter().map(|p| p.sentiment).collect();
        let moving_average = trailing_moving_average(&sentiments, self.moving_average_window);

        debug!(entry_count, longest_streak, "Computed mood trend report");

        MoodTrendReport {
            entry_count,
            average,
            best_day: best.map(MoodDay::of),
            worst_day: worst.map(MoodDay::of),
            distribution_shares: distribution.shares(),
            distribution,
            longest_positive_streak: longest_streak,
            recent_change,
            recent_trend: recent_change.map(Trend::of),
            series,
            moving_average,
            moving_average_window: self.moving_average_window,
        }
    }
}

fn is_chronological(entries: &[MoodEntry]) -> bool {
    entries.windows(2).all(|w| w[0].timestamp <= w[1].timestamp)
}
