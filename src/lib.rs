//! Workload analysis and task distribution for the U-Engine ecosystem.
//!
//! Computes daily per-resource load from dated tasks, scores and
//! aggregates it system-wide and per period, and distributes tasks across
//! resources with a greedy builder, a bounded rebalancer and advisory move
//! recommendations.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `Resource`, `DailyLoadRecord`,
//!   load summaries, `DistributionPlan`, `MoveRecommendation`, calendar helpers
//! - **`load`**: Daily load calculation, scoring, system and periodical aggregation
//! - **`distribution`**: Initial distribution, rebalancing, move recommendations
//! - **`config`**: Thresholds and defaults (`EngineConfig`, TOML-loadable)
//! - **`validation`**: Input integrity checks (duplicate IDs, dates, capacities, resource refs)
//! - **`error`**: `EngineError` and the crate `Result`
//!
//! All computation is pure and deterministic. Logging goes through
//! `tracing`; installing a subscriber is left to the host.
//!
//! # Example
//!
//! ```
//! use u_workload::{EngineConfig, LoadCalculator};
//! use u_workload::models::{Resource, Task};
//! use chrono::NaiveDate;
//!
//! let monday = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
//! let friday = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
//! let tasks = vec![Task::new("T1", monday, friday).with_effort(20.0).with_resource("R1")];
//! let resources = vec![Resource::new("R1", "developer")];
//!
//! let calculator = LoadCalculator::new().with_config(EngineConfig::default());
//! let system = calculator.system_summary(&tasks, &resources, monday, friday);
//! assert!((system.avg_load - 50.0).abs() < 1e-10);
//! ```

pub mod config;
pub mod distribution;
pub mod error;
pub mod load;
pub mod models;
pub mod validation;

pub use config::EngineConfig;
pub use distribution::DistributionOptimizer;
pub use error::{EngineError, Result};
pub use load::LoadCalculator;
