//! Distribution plan and move recommendation models.
//!
//! A distribution plan maps every input task to exactly one resource, with
//! a free-text reason for each choice. Move recommendations are advisory
//! single-task moves; nothing in the engine applies them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::{Priority, Resource, Task};

/// One task's place in a distribution plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionPlanEntry {
    pub task_id: String,
    pub task_name: String,
    pub priority: Priority,
    /// Effort hours counted against the resource (default applied).
    pub effort: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub resource_id: String,
    pub resource_name: String,
    /// Fixed entries are never moved.
    pub is_fixed: bool,
    /// Why the task landed on this resource.
    pub reason: String,
    /// Required resource type, carried from the task.
    pub resource_type: Option<String>,
    /// Required skills, carried from the task.
    pub required_skills: BTreeSet<String>,
}

/// An ordered task→resource assignment covering every task once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionPlan {
    pub entries: Vec<DistributionPlanEntry>,
}

/// Assignments the distribution builder must honour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionConstraints {
    /// task id → resource id.
    pub fixed_assignments: HashMap<String, String>,
}

/// A proposed single-task move off an overloaded day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecommendation {
    pub task_id: String,
    pub task_name: String,
    pub current_resource_id: String,
    pub suggested_resource_id: String,
    /// The over-threshold date that triggered the move.
    pub overload_date: NaiveDate,
    /// Hours the task contributes on `overload_date`.
    pub contribution_hours: f64,
    /// Percentage points removed from the source resource's day.
    pub expected_load_reduction: f64,
    pub reason: String,
}

impl DistributionPlanEntry {
    /// Creates an entry placing `task` on `resource`.
    pub fn new(
        task: &Task,
        resource: &Resource,
        effort: f64,
        is_fixed: bool,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task.id.clone(),
            task_name: task.name.clone(),
            priority: task.priority,
            effort,
            start_date: task.start_date,
            end_date: task.end_date,
            resource_id: resource.id.clone(),
            resource_name: resource.name.clone(),
            is_fixed,
            reason: reason.into(),
            resource_type: task.resource_type.clone(),
            required_skills: task.required_skills.clone(),
        }
    }

    /// Whether `resource` meets this entry's type and skill requirements.
    pub fn fits(&self, resource: &Resource) -> bool {
        resource.satisfies(self.resource_type.as_deref(), &self.required_skills)
    }
}

impl DistributionPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: DistributionPlanEntry) {
        self.entries.push(entry);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the plan has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the entry for a task.
    pub fn entry(&self, task_id: &str) -> Option<&DistributionPlanEntry> {
        self.entries.iter().find(|e| e.task_id == task_id)
    }

    /// Entries assigned to a resource, in plan order.
    pub fn entries_for_resource(&self, resource_id: &str) -> Vec<&DistributionPlanEntry> {
        self.entries
            .iter()
            .filter(|e| e.resource_id == resource_id)
            .collect()
    }

    /// Total effort hours assigned to a resource.
    pub fn assigned_effort(&self, resource_id: &str) -> f64 {
        self.entries
            .iter()
            .filter(|e| e.resource_id == resource_id)
            .map(|e| e.effort)
            .sum()
    }
}

impl DistributionConstraints {
    /// Creates empty constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins a task to a resource.
    pub fn with_fixed(mut self, task_id: impl Into<String>, resource_id: impl Into<String>) -> Self {
        self.fixed_assignments
            .insert(task_id.into(), resource_id.into());
        self
    }

    /// Resource a task is pinned to, if any.
    pub fn fixed_resource(&self, task_id: &str) -> Option<&str> {
        self.fixed_assignments.get(task_id).map(String::as_str)
    }
}
