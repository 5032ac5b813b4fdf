//! Load records and summaries.
//!
//! Derived values produced by the load calculator and aggregators. They are
//! rebuilt from tasks and resources on every call and never cached.
//!
//! # Load
//! `load = work_hours / capacity * 100`, rounded to two decimals. A day with
//! zero capacity has load 0 and does not count toward averages.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Utilization band of a load percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadStatus {
    /// Above the overload cutoff (default 100%).
    Overload,
    /// Above the high cutoff, up to overload (default 80–100%).
    High,
    /// Healthy band (default 30–80%).
    Normal,
    /// Below the underutilized cutoff (default 30%).
    Underutilized,
}

/// Hours one task adds to one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskContribution {
    pub task_id: String,
    pub name: String,
    pub hours: f64,
}

/// Load of one resource on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLoadRecord {
    pub date: NaiveDate,
    /// Tasks active on this date, including zero-hour weekend entries.
    pub tasks: Vec<TaskContribution>,
    pub work_hours: f64,
    /// Effective capacity for the date (weekend-aware).
    pub capacity: f64,
    /// Percent of capacity, two decimals.
    pub load: f64,
    pub status: LoadStatus,
}

/// Day counts per band over qualifying days.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadStats {
    /// Days counted (capacity > 0).
    pub total_days: usize,
    pub overloaded_days: usize,
    pub high_days: usize,
    pub normal_days: usize,
    pub underutilized_days: usize,
    pub overloaded_percent: f64,
    pub underutilized_percent: f64,
}

/// Load profile of a single resource over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLoadSummary {
    pub resource_id: String,
    pub resource_name: String,
    pub resource_type: String,
    pub daily_capacity: f64,
    pub avg_load: f64,
    pub max_load: f64,
    /// Balance score (0-100).
    pub load_score: f64,
    pub load_by_date: Vec<DailyLoadRecord>,
    pub summary: LoadStats,
}

/// System-wide load on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemDailyLoad {
    pub date: NaiveDate,
    /// Mean load over active resources.
    pub avg_load: f64,
    pub max_load: f64,
    /// Resources with capacity on this date.
    pub resource_count: usize,
    pub overloaded_count: usize,
    pub high_count: usize,
    pub normal_count: usize,
    pub underutilized_count: usize,
    pub status: LoadStatus,
}

/// System-wide load over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemLoadSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub resources: Vec<ResourceLoadSummary>,
    pub system_load_by_date: Vec<SystemDailyLoad>,
    pub avg_load: f64,
    pub max_load: f64,
    /// Resource-curve score over the daily system averages.
    pub load_score: f64,
    /// System balance score (load curve + resource balance).
    pub balance_index: f64,
    /// Percent of days classified `Normal`.
    pub health_score: f64,
    pub summary: LoadStats,
}

/// Aggregated load for one day, week or month bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodLoad {
    /// Bucket key: `YYYY-MM-DD` (day, week Monday) or `YYYY-MM` (month).
    pub period: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub avg_load: f64,
    pub max_load: f64,
    pub total_days: usize,
    pub working_days: usize,
    pub overloaded_days: usize,
    pub high_days: usize,
    pub normal_days: usize,
    pub underutilized_days: usize,
    pub overloaded_percent: f64,
    pub health_score: f64,
}

/// A dated load sample that can be bucketed and scored.
pub trait LoadSample {
    fn date(&self) -> NaiveDate;

    /// Load percentage.
    fn load(&self) -> f64;

    fn status(&self) -> LoadStatus;

    /// Whether the sample had any capacity behind it.
    fn is_working(&self) -> bool;
}

impl LoadSample for DailyLoadRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn load(&self) -> f64 {
        self.load
    }

    fn status(&self) -> LoadStatus {
        self.status
    }

    fn is_working(&self) -> bool {
        self.capacity > 0.0
    }
}

impl LoadSample for SystemDailyLoad {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn load(&self) -> f64 {
        self.avg_load
    }

    fn status(&self) -> LoadStatus {
        self.status
    }

    fn is_working(&self) -> bool {
        self.resource_count > 0
    }
}

impl LoadStats {
    /// Counts statuses. Every item is a qualifying day.
    pub fn tally(statuses: impl IntoIterator<Item = LoadStatus>) -> Self {
        let mut stats = Self::default();
        for status in statuses {
            stats.total_days += 1;
            match status {
                LoadStatus::Overload => stats.overloaded_days += 1,
                LoadStatus::High => stats.high_days += 1,
                LoadStatus::Normal => stats.normal_days += 1,
                LoadStatus::Underutilized => stats.underutilized_days += 1,
            }
        }
        stats.overloaded_percent = percent(stats.overloaded_days, stats.total_days);
        stats.underutilized_percent = percent(stats.underutilized_days, stats.total_days);
        stats
    }
}

impl ResourceLoadSummary {
    /// Record for a date, if inside the summarized range.
    pub fn record_on(&self, date: NaiveDate) -> Option<&DailyLoadRecord> {
        self.load_by_date.iter().find(|r| r.date == date)
    }

    /// Whether any day exceeds `threshold` percent.
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.load_by_date.iter().any(|r| r.load > threshold)
    }
}

/// Rounds to two decimals.
#[inline]
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / whole * 100`, rounded; 0 when `whole` is 0.
pub(crate) fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        round2(part as f64 / whole as f64 * 100.0)
    }
}

/// Arithmetic mean; 0 for an empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
