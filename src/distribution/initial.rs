//! Initial distribution builder.
//!
//! # Algorithm
//!
//! 1. Sort tasks by priority (descending), then end date (ascending).
//! 2. Pinned tasks go to their resource unconditionally.
//! 3. Other tasks go to the least-loaded resource matching their type and
//!    skills, or the least-loaded resource overall when none match.
//!
//! Load here is cumulative effort hours, not a percentage.
//!
//! # Complexity
//! O(n log n + n * r) where n=tasks, r=resources.
//!
//! # Reference
//! Graham (1969), "Bounds on Multiprocessing Timing Anomalies" (list scheduling)

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::config::CapacityDefaults;
use crate::error::{EngineError, Result};
use crate::models::{DistributionConstraints, DistributionPlan, DistributionPlanEntry, Resource, Task};

pub(crate) const FIXED_REASON: &str = "fixed assignment";
pub(crate) const AUTOMATIC_REASON: &str = "automatic assignment";

/// Builds a plan with one entry per task, in processing order.
///
/// A task is pinned when `constraints` names it, or when it is itself
/// marked fixed and already assigned. Pinned effort still counts toward
/// its resource's running load. A fixed task with no resource is placed
/// automatically and stays fixed where it lands.
///
/// # Errors
/// - `InvalidInput` if `tasks` or `resources` is empty.
/// - `NotFound` if a pinned task names a resource not in `resources`.
pub fn build_initial_distribution(
    tasks: &[Task],
    resources: &[Resource],
    constraints: &DistributionConstraints,
    defaults: &CapacityDefaults,
) -> Result<DistributionPlan> {
    if tasks.is_empty() {
        return Err(EngineError::invalid_input("no tasks to distribute"));
    }
    if resources.is_empty() {
        return Err(EngineError::invalid_input("no resources to distribute tasks to"));
    }

    let mut order: Vec<&Task> = tasks.iter().collect();
    order.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.end_date.cmp(&b.end_date))
    });

    let mut total_load: HashMap<&str, f64> =
        resources.iter().map(|r| (r.id.as_str(), 0.0)).collect();
    let mut plan = DistributionPlan::new();

    for task in order {
        let effort = task.effort_or(defaults.default_task_effort);

        if let Some(resource_id) = pinned_resource(task, constraints) {
            let resource = resources
                .iter()
                .find(|r| r.id == resource_id)
                .ok_or_else(|| EngineError::resource_not_found(resource_id))?;
            *total_load.entry(resource.id.as_str()).or_default() += effort;
            plan.push(DistributionPlanEntry::new(task, resource, effort, true, FIXED_REASON));
            continue;
        }

        let mut candidates: Vec<&Resource> = resources.iter().filter(|r| r.matches(task)).collect();
        if candidates.is_empty() {
            warn!(task = %task.id, "no resource matches type/skills, considering all resources");
            candidates = resources.iter().collect();
        }

        let load_of = |r: &Resource| total_load.get(r.id.as_str()).copied().unwrap_or_default();
        let chosen = candidates
            .into_iter()
            .min_by(|a, b| load_of(*a).total_cmp(&load_of(*b)))
            .ok_or_else(|| EngineError::invalid_input("no candidate resources"))?;

        *total_load.entry(chosen.id.as_str()).or_default() += effort;
        debug!(task = %task.id, resource = %chosen.id, effort, "assigned task");
        plan.push(DistributionPlanEntry::new(task, chosen, effort, task.is_fixed, AUTOMATIC_REASON));
    }

    Ok(plan)
}

fn pinned_resource<'a>(task: &'a Task, constraints: &'a DistributionConstraints) -> Option<&'a str> {
    constraints.fixed_resource(&task.id).or_else(|| {
        if task.is_fixed {
            task.resource_id.as_deref()
        } else {
            None
        }
    })
}
