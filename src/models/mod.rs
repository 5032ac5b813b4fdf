//! Workload domain models.
//!
//! Input types (`Task`, `Resource`), calendar utilities, and the derived
//! records the engine produces (daily loads, summaries, plans, move
//! recommendations).
//!
//! # Domain Mappings
//!
//! | u-workload | Software team | Field service | Clinic |
//! |------------|--------------|---------------|--------|
//! | Task | Ticket/Story | Work order | Appointment block |
//! | Resource | Engineer | Technician | Practitioner |
//! | DistributionPlan | Sprint staffing | Dispatch roster | Rota |

pub mod calendar;
mod load;
mod plan;
mod resource;
mod task;

pub use calendar::{date_range, is_weekend, week_start, working_days_between, DateRange};
pub use load::{
    DailyLoadRecord, LoadSample, LoadStats, LoadStatus, PeriodLoad, ResourceLoadSummary,
    SystemDailyLoad, SystemLoadSummary, TaskContribution,
};
pub(crate) use load::{mean, percent, round2};
pub use plan::{
    DistributionConstraints, DistributionPlan, DistributionPlanEntry, MoveRecommendation,
};
pub use resource::Resource;
pub use task::{Priority, Task, TaskStatus, WorkEstimate};
