//! Daily load calculator.
//!
//! # Algorithm
//!
//! For each date in the window and each task active on that date:
//! 1. Spread the task's hours evenly over the weekdays of its own span.
//! 2. Zero the contribution on weekends unless the task works weekends.
//! 3. Divide the day's total by the resource's effective capacity.
//!
//! A task whose span has no weekdays contributes nothing, even with
//! `work_on_weekend` set.
//!
//! # Complexity
//! O(d * t) per resource, where d=days in window, t=tasks.

use chrono::NaiveDate;
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::debug;

use super::score::resource_load_score;
use super::system::aggregate_system_load;
use crate::config::EngineConfig;
use crate::models::{
    date_range, is_weekend, mean, round2, working_days_between, DailyLoadRecord, LoadStats,
    Resource, ResourceLoadSummary, SystemLoadSummary, Task, TaskContribution,
};

/// Computes per-day, per-resource and system load.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_workload::load::LoadCalculator;
/// use u_workload::models::{LoadStatus, Resource, Task};
///
/// let mon = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
/// let fri = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
/// let resource = Resource::new("R1", "developer");
/// let tasks = vec![Task::new("T1", mon, fri).with_effort(44.0).with_resource("R1")];
///
/// let calculator = LoadCalculator::new();
/// let records = calculator.daily_loads(&tasks, &resource, mon, fri);
/// assert_eq!(records.len(), 5);
/// assert!((records[0].load - 110.0).abs() < 1e-10);
/// assert_eq!(records[0].status, LoadStatus::Overload);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoadCalculator {
    config: EngineConfig,
}

impl LoadCalculator {
    /// Creates a calculator with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Hours a task adds to each of its weekdays.
    ///
    /// Returns 0 when the task span has no weekdays.
    pub fn hours_per_working_day(&self, task: &Task) -> f64 {
        let working_days = working_days_between(task.start_date, task.end_date);
        if working_days == 0 {
            return 0.0;
        }
        task.estimate
            .total_hours(self.config.capacity.default_task_effort)
            / f64::from(working_days)
    }

    /// Hours a task adds on a specific date (0 outside its span).
    pub fn contribution_on(&self, task: &Task, date: NaiveDate) -> f64 {
        if !task.is_active_on(date) || (is_weekend(date) && !task.work_on_weekend) {
            return 0.0;
        }
        self.hours_per_working_day(task)
    }

    /// Daily load records for one resource over `[start, end]`.
    ///
    /// `tasks` are taken as the resource's tasks without checking `resource_id`.
    pub fn daily_loads(
        &self,
        tasks: &[Task],
        resource: &Resource,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<DailyLoadRecord> {
        let tasks: Vec<&Task> = tasks.iter().collect();
        self.daily_loads_for(&tasks, resource, start, end)
    }

    fn daily_loads_for(
        &self,
        tasks: &[&Task],
        resource: &Resource,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<DailyLoadRecord> {
        let per_day: Vec<f64> = tasks
            .iter()
            .map(|t| self.hours_per_working_day(t))
            .collect();
        let default_capacity = self.config.capacity.default_daily_capacity;

        date_range(start, end)
            .map(|date| {
                let weekend = is_weekend(date);
                let contributions: Vec<TaskContribution> = tasks
                    .iter()
                    .zip(&per_day)
                    .filter(|(task, _)| task.is_active_on(date))
                    .map(|(task, &hours)| TaskContribution {
                        task_id: task.id.clone(),
                        name: task.name.clone(),
                        hours: if weekend && !task.work_on_weekend {
                            0.0
                        } else {
                            hours
                        },
                    })
                    .collect();

                let work_hours: f64 = contributions.iter().map(|c| c.hours).sum();
                let capacity = resource.capacity_on(date, default_capacity);
                let load = if capacity > 0.0 {
                    round2(work_hours / capacity * 100.0)
                } else {
                    0.0
                };

                DailyLoadRecord {
                    date,
                    tasks: contributions,
                    work_hours,
                    capacity,
                    load,
                    status: self.config.bands.classify(load),
                }
            })
            .collect()
    }

    /// Builds the summary for one resource from its daily records.
    pub fn summarize(&self, resource: &Resource, records: Vec<DailyLoadRecord>) -> ResourceLoadSummary {
        let qualifying: Vec<&DailyLoadRecord> =
            records.iter().filter(|r| r.capacity > 0.0).collect();
        let loads: Vec<f64> = qualifying.iter().map(|r| r.load).collect();
        let max_load = records.iter().map(|r| r.load).fold(0.0, f64::max);

        ResourceLoadSummary {
            resource_id: resource.id.clone(),
            resource_name: resource.name.clone(),
            resource_type: resource.resource_type.clone(),
            daily_capacity: resource.daily_capacity_or(self.config.capacity.default_daily_capacity),
            avg_load: round2(mean(&loads)),
            max_load,
            load_score: resource_load_score(&records),
            summary: LoadStats::tally(qualifying.iter().map(|r| r.status)),
            load_by_date: records,
        }
    }

    /// Load summary for one resource.
    pub fn resource_summary(
        &self,
        tasks: &[Task],
        resource: &Resource,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ResourceLoadSummary {
        let records = self.daily_loads(tasks, resource, start, end);
        self.summarize(resource, records)
    }

    /// Load summaries for every resource, in `resources` order.
    ///
    /// Tasks are routed by `resource_id`; unassigned tasks and tasks naming
    /// an unknown resource are ignored. Resources are computed in parallel.
    pub fn resource_summaries(
        &self,
        tasks: &[Task],
        resources: &[Resource],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<ResourceLoadSummary> {
        let mut by_resource: HashMap<&str, Vec<&Task>> = HashMap::new();
        for task in tasks {
            if let Some(resource_id) = task.resource_id.as_deref() {
                by_resource.entry(resource_id).or_default().push(task);
            }
        }

        resources
            .par_iter()
            .map(|resource| {
                let assigned = by_resource
                    .get(resource.id.as_str())
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                let records = self.daily_loads_for(assigned, resource, start, end);
                let summary = self.summarize(resource, records);
                debug!(
                    resource = %summary.resource_id,
                    tasks = assigned.len(),
                    avg_load = summary.avg_load,
                    max_load = summary.max_load,
                    "computed resource load"
                );
                summary
            })
            .collect()
    }

    /// System-wide load summary over all resources.
    pub fn system_summary(
        &self,
        tasks: &[Task],
        resources: &[Resource],
        start: NaiveDate,
        end: NaiveDate,
    ) -> SystemLoadSummary {
        let summaries = self.resource_summaries(tasks, resources, start, end);
        aggregate_system_load(&self.config, summaries, resources, start, end)
    }
}
