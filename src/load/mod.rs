//! Load calculation, scoring and aggregation.
//!
//! # Pipeline
//!
//! 1. `LoadCalculator` turns tasks into per-resource `DailyLoadRecord`s.
//! 2. `score` maps daily loads onto a 0–100 balance score.
//! 3. `system` folds resource records into system-wide daily records.
//! 4. `periodical` buckets any daily series by day, week or month.
//!
//! Per-resource computation is independent and runs in parallel; results
//! come back in input resource order.

mod daily;
mod periodical;
mod score;
mod system;

pub use daily::LoadCalculator;
pub use periodical::{analyze_periodical_load, analyze_periodical_load_by_key, Interval};
pub use score::{
    resource_day_score, resource_load_score, system_day_load_score, system_load_score,
};
pub use system::aggregate_system_load;
