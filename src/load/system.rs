//! System load aggregation.
//!
//! Folds per-resource daily records into one record per date and a
//! summary over the whole window.
//!
//! # Day classification
//! With fractions taken over active resources (capacity > 0 that day):
//! 1. `Overload` if overloaded ≥ `overload_fraction` (0.3)
//! 2. `High` if high + overloaded ≥ `high_fraction` (0.5)
//! 3. `Underutilized` if underutilized ≥ `underutilized_fraction` (0.5)
//! 4. `Normal` otherwise

use chrono::NaiveDate;

use super::score::{resource_day_score, system_load_score};
use crate::config::{EngineConfig, SystemBands};
use crate::models::{
    date_range, mean, percent, round2, LoadStats, LoadStatus, Resource, ResourceLoadSummary,
    SystemDailyLoad, SystemLoadSummary,
};

/// Aggregates resource summaries into a system summary over `[start, end]`.
///
/// `resources` supplies capacities for dates a summary has no record for;
/// such a resource counts as idle (load 0, `Normal`) on that date.
pub fn aggregate_system_load(
    config: &EngineConfig,
    summaries: Vec<ResourceLoadSummary>,
    resources: &[Resource],
    start: NaiveDate,
    end: NaiveDate,
) -> SystemLoadSummary {
    let default_capacity = config.capacity.default_daily_capacity;

    let days: Vec<SystemDailyLoad> = date_range(start, end)
        .map(|date| {
            let samples: Vec<(f64, LoadStatus)> = summaries
                .iter()
                .filter_map(|summary| match summary.record_on(date) {
                    Some(record) => (record.capacity > 0.0).then_some((record.load, record.status)),
                    None => resources
                        .iter()
                        .find(|r| r.id == summary.resource_id)
                        .filter(|r| r.capacity_on(date, default_capacity) > 0.0)
                        .map(|_| (0.0, LoadStatus::Normal)),
                })
                .collect();
            system_day(date, &samples, &config.system_bands)
        })
        .collect();

    let active: Vec<&SystemDailyLoad> = days.iter().filter(|d| d.resource_count > 0).collect();
    let loads: Vec<f64> = active.iter().map(|d| d.avg_load).collect();
    let day_scores: Vec<f64> = loads.iter().map(|&l| resource_day_score(l)).collect();
    let summary = LoadStats::tally(active.iter().map(|d| d.status));

    SystemLoadSummary {
        start_date: start,
        end_date: end,
        avg_load: round2(mean(&loads)),
        max_load: loads.iter().copied().fold(0.0, f64::max),
        load_score: if loads.iter().any(|&l| l > 0.0) {
            round2(mean(&day_scores))
        } else {
            0.0
        },
        balance_index: system_load_score(&days),
        health_score: percent(summary.normal_days, summary.total_days),
        summary,
        system_load_by_date: days,
        resources: summaries,
    }
}

/// Builds one system day from active `(load, status)` samples.
fn system_day(date: NaiveDate, samples: &[(f64, LoadStatus)], bands: &SystemBands) -> SystemDailyLoad {
    let count = |status: LoadStatus| samples.iter().filter(|(_, s)| *s == status).count();
    let overloaded = count(LoadStatus::Overload);
    let high = count(LoadStatus::High);
    let normal = count(LoadStatus::Normal);
    let underutilized = count(LoadStatus::Underutilized);
    let loads: Vec<f64> = samples.iter().map(|(l, _)| *l).collect();

    let fraction = |n: usize| {
        if samples.is_empty() {
            0.0
        } else {
            n as f64 / samples.len() as f64
        }
    };

    let status = if samples.is_empty() {
        LoadStatus::Normal
    } else if fraction(overloaded) >= bands.overload_fraction {
        LoadStatus::Overload
    } else if fraction(high + overloaded) >= bands.high_fraction {
        LoadStatus::High
    } else if fraction(underutilized) >= bands.underutilized_fraction {
        LoadStatus::Underutilized
    } else {
        LoadStatus::Normal
    };

    SystemDailyLoad {
        date,
        avg_load: round2(mean(&loads)),
        max_load: loads.iter().copied().fold(0.0, f64::max),
        resource_count: samples.len(),
        overloaded_count: overloaded,
        high_count: high,
        normal_count: normal,
        underutilized_count: underutilized,
        status,
    }
}
