//! Balance scoring.
//!
//! Maps load percentages onto a 0–100 score where the healthy band scores
//! high and both idle and overloaded days score low.
//!
//! # Resource curve
//!
//! | Load (%) | Score |
//! |----------|-------|
//! | ≤ 0 | 0 |
//! | 0–30 | 0 → 50 |
//! | 30–80 | 50 → 100 |
//! | 80–100 | 100 → 80 |
//! | 100–150 | 80 → 0 |
//!
//! The peak sits at 80%: running slightly hot scores better than idling.
//!
//! # System curve
//!
//! | Load (%) | Score |
//! |----------|-------|
//! | 0–30 | 0 → 60 |
//! | 30–80 | 60 → 100 |
//! | 80–100 | 100 → 70 |
//! | 100–150 | 70 → 0 |
//!
//! Each system day blends 70% load curve with 30% resource balance, the
//! share of active resources that are neither overloaded nor underutilized.

use crate::models::{mean, round2, DailyLoadRecord, SystemDailyLoad};

const LOAD_WEIGHT: f64 = 0.7;
const BALANCE_WEIGHT: f64 = 0.3;

/// Score for a single resource-day load.
pub fn resource_day_score(load: f64) -> f64 {
    if load <= 0.0 {
        0.0
    } else if load <= 30.0 {
        (load / 30.0) * 50.0
    } else if load <= 80.0 {
        50.0 + ((load - 30.0) / 50.0) * 50.0
    } else if load <= 100.0 {
        100.0 - ((load - 80.0) / 20.0) * 20.0
    } else {
        (80.0 - ((load - 100.0) / 50.0) * 80.0).max(0.0)
    }
}

/// Load-balance component for a system-day average load.
pub fn system_day_load_score(load: f64) -> f64 {
    if load <= 0.0 {
        0.0
    } else if load <= 30.0 {
        (load / 30.0) * 60.0
    } else if load <= 80.0 {
        60.0 + ((load - 30.0) / 50.0) * 40.0
    } else if load <= 100.0 {
        100.0 - ((load - 80.0) / 20.0) * 30.0
    } else {
        (70.0 - ((load - 100.0) / 50.0) * 70.0).max(0.0)
    }
}

/// Balance score of one resource over its daily records (0–100).
///
/// Returns 0 when there are no records or no day carries any work.
pub fn resource_load_score(records: &[DailyLoadRecord]) -> f64 {
    if records.iter().all(|r| r.work_hours <= 0.0) {
        return 0.0;
    }
    let scores: Vec<f64> = records.iter().map(|r| resource_day_score(r.load)).collect();
    round2(mean(&scores))
}

/// Balance score of the system over its daily records (0–100).
///
/// Days without active resources are skipped.
pub fn system_load_score(records: &[SystemDailyLoad]) -> f64 {
    let scores: Vec<f64> = records
        .iter()
        .filter(|r| r.resource_count > 0)
        .map(|r| {
            let load_balance = system_day_load_score(r.avg_load);
            let resource_balance = 1.0
                - (r.overloaded_count + r.underutilized_count) as f64 / r.resource_count as f64;
            LOAD_WEIGHT * load_balance + BALANCE_WEIGHT * resource_balance * 100.0
        })
        .collect();
    round2(mean(&scores))
}
