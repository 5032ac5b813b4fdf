//! Periodical load aggregation.
//!
//! Buckets any dated load series by day, ISO week (keyed by its Monday) or
//! calendar month.
//!
//! # Reference
//! ISO 8601 week dates (weeks start on Monday)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, Result};
use crate::models::{mean, percent, round2, week_start, LoadSample, LoadStats, PeriodLoad};

/// Bucket size for periodical aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Day,
    Week,
    Month,
}

impl Interval {
    /// Lowercase key: `day`, `week` or `month`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Day => "day",
            Interval::Week => "week",
            Interval::Month => "month",
        }
    }

    /// Bucket key for a date.
    pub fn key(&self, date: NaiveDate) -> String {
        match self {
            Interval::Day => date.format("%Y-%m-%d").to_string(),
            Interval::Week => week_start(date).format("%Y-%m-%d").to_string(),
            Interval::Month => date.format("%Y-%m").to_string(),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "day" => Ok(Interval::Day),
            "week" => Ok(Interval::Week),
            "month" => Ok(Interval::Month),
            other => Err(EngineError::InvalidIntervalKey(other.to_string())),
        }
    }
}

/// Groups samples into buckets, sorted by bucket start date.
///
/// Averages and band counts use working samples only; `total_days` counts
/// every sample in the bucket.
pub fn analyze_periodical_load<S: LoadSample>(samples: &[S], interval: Interval) -> Vec<PeriodLoad> {
    let mut buckets: HashMap<String, Vec<&S>> = HashMap::new();
    for sample in samples {
        buckets
            .entry(interval.key(sample.date()))
            .or_default()
            .push(sample);
    }

    let mut periods: Vec<PeriodLoad> = buckets
        .into_iter()
        .filter_map(|(period, members)| {
            let start_date = members.iter().map(|s| s.date()).min()?;
            let end_date = members.iter().map(|s| s.date()).max()?;
            let working: Vec<&&S> = members.iter().filter(|s| s.is_working()).collect();
            let loads: Vec<f64> = working.iter().map(|s| s.load()).collect();
            let stats = LoadStats::tally(working.iter().map(|s| s.status()));

            Some(PeriodLoad {
                period,
                start_date,
                end_date,
                avg_load: round2(mean(&loads)),
                max_load: loads.iter().copied().fold(0.0, f64::max),
                total_days: members.len(),
                working_days: stats.total_days,
                overloaded_days: stats.overloaded_days,
                high_days: stats.high_days,
                normal_days: stats.normal_days,
                underutilized_days: stats.underutilized_days,
                overloaded_percent: stats.overloaded_percent,
                health_score: percent(stats.normal_days, stats.total_days),
            })
        })
        .collect();

    periods.sort_by(|a, b| a.start_date.cmp(&b.start_date));
    periods
}

/// String-keyed variant of [`analyze_periodical_load`].
///
/// # Errors
/// `EngineError::InvalidIntervalKey` for anything but `day`, `week`, `month`.
pub fn analyze_periodical_load_by_key<S: LoadSample>(
    samples: &[S],
    key: &str,
) -> Result<Vec<PeriodLoad>> {
    let interval: Interval = key.parse()?;
    Ok(analyze_periodical_load(samples, interval))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::LoadCalculator;
    use crate::models::{Resource, Task};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn records(start: NaiveDate, end: NaiveDate) -> Vec<crate::models::DailyLoadRecord> {
        let tasks = vec![Task::new("T1", start, end).with_effort(
            f64::from(crate::models::working_days_between(start, end)) * 4.0,
        )];
        LoadCalculator::new().daily_loads(&tasks, &Resource::new("R1", "dev"), start, end)
    }

    #[test]
    fn test_week_bucket_starts_on_monday() {
        let series = records(date(1, 6), date(1, 12));
        let weeks = analyze_periodical_load(&series, Interval::Week);

        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].period, "2025-01-06");
        assert_eq!(weeks[0].start_date, date(1, 6));
        assert_eq!(weeks[0].end_date, date(1, 12));
        assert_eq!(weeks[0].total_days, 7);
        assert_eq!(weeks[0].working_days, 5);
        assert!((weeks[0].avg_load - 50.0).abs() < 1e-10);
        assert!((weeks[0].health_score - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_midweek_start_splits_weeks() {
        let series = records(date(1, 9), date(1, 15)); // Thu .. Wed
        let weeks = analyze_periodical_load(&series, Interval::Week);

        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].period, "2025-01-06");
        assert_eq!(weeks[0].start_date, date(1, 9));
        assert_eq!(weeks[1].period, "2025-01-13");
        assert_eq!(weeks[1].end_date, date(1, 15));
    }

    #[test]
    fn test_month_buckets_sorted() {
        let series = records(date(1, 27), date(2, 4));
        let months = analyze_periodical_load(&series, Interval::Month);

        let keys: Vec<_> = months.iter().map(|m| m.period.as_str()).collect();
        assert_eq!(keys, vec!["2025-01", "2025-02"]);
        assert_eq!(months[0].end_date, date(1, 31));
        assert_eq!(months[1].start_date, date(2, 1));
    }

    #[test]
    fn test_day_buckets() {
        let series = records(date(1, 6), date(1, 8));
        let days = analyze_periodical_load(&series, Interval::Day);
        assert_eq!(days.len(), 3);
        assert_eq!(days[2].period, "2025-01-08");
        assert_eq!(days[2].start_date, days[2].end_date);
    }

    #[test]
    fn test_overloaded_percent() {
        let tasks = vec![
            Task::new("T1", date(1, 6), date(1, 6)).with_effort(12.0),
            Task::new("T2", date(1, 7), date(1, 7)).with_effort(4.0),
        ];
        let series = LoadCalculator::new().daily_loads(
            &tasks,
            &Resource::new("R1", "dev"),
            date(1, 6),
            date(1, 7),
        );
        let weeks = analyze_periodical_load(&series, Interval::Week);
        assert_eq!(weeks[0].overloaded_days, 1);
        assert!((weeks[0].overloaded_percent - 50.0).abs() < 1e-10);
        assert!((weeks[0].max_load - 150.0).abs() < 1e-10);
        assert!((weeks[0].health_score - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_by_key() {
        let series = records(date(1, 6), date(1, 12));
        assert_eq!(analyze_periodical_load_by_key(&series, "week").unwrap().len(), 1);

        let err = analyze_periodical_load_by_key(&series, "quarter").unwrap_err();
        assert!(matches!(err, EngineError::InvalidIntervalKey(ref k) if k == "quarter"));
    }

    #[test]
    fn test_system_series() {
        let resources = vec![Resource::new("R1", "dev")];
        let tasks = vec![Task::new("T1", date(1, 6), date(1, 10))
            .with_effort(20.0)
            .with_resource("R1")];
        let system =
            LoadCalculator::new().system_summary(&tasks, &resources, date(1, 6), date(1, 12));
        let weeks = analyze_periodical_load(&system.system_load_by_date, Interval::Week);

        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].working_days, 5);
        assert!((weeks[0].avg_load - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_empty_series() {
        let series: Vec<crate::models::DailyLoadRecord> = Vec::new();
        assert!(analyze_periodical_load(&series, Interval::Month).is_empty());
    }
}
