//! Resource model.
//!
//! Resources are the people or units that carry task load. Each has a type,
//! a plan-level effort budget, daily and weekend hour capacities, and a
//! skill set.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::calendar::is_weekend;
use super::Task;

/// A resource that tasks can be assigned to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Resource classification (e.g. "developer", "designer").
    pub resource_type: String,
    /// Total effort budget in hours, used for plan-level load.
    #[serde(default)]
    pub capacity: f64,
    /// Working hours per weekday. `None` = configured default.
    #[serde(default)]
    pub daily_capacity: Option<f64>,
    /// Working hours per Saturday/Sunday.
    #[serde(default)]
    pub weekend_capacity: f64,
    /// Skill identifiers.
    #[serde(default)]
    pub skills: BTreeSet<String>,
}

impl Resource {
    /// Creates a resource with default weekday hours, no weekend hours and no budget.
    pub fn new(id: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            resource_type: resource_type.into(),
            capacity: 0.0,
            daily_capacity: None,
            weekend_capacity: 0.0,
            skills: BTreeSet::new(),
        }
    }

    /// Sets the resource name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the plan-level effort budget.
    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets weekday hours.
    pub fn with_daily_capacity(mut self, hours: f64) -> Self {
        self.daily_capacity = Some(hours);
        self
    }

    /// Sets weekend hours.
    pub fn with_weekend_capacity(mut self, hours: f64) -> Self {
        self.weekend_capacity = hours;
        self
    }

    /// Adds a skill.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.insert(skill.into());
        self
    }

    /// Weekday hours, or `default_hours` when unset.
    #[inline]
    pub fn daily_capacity_or(&self, default_hours: f64) -> f64 {
        self.daily_capacity.unwrap_or(default_hours)
    }

    /// Effective hour capacity on a given date.
    #[inline]
    pub fn capacity_on(&self, date: NaiveDate, default_hours: f64) -> f64 {
        if is_weekend(date) {
            self.weekend_capacity
        } else {
            self.daily_capacity_or(default_hours)
        }
    }

    /// Whether this resource holds every skill in `required`.
    pub fn has_skills(&self, required: &BTreeSet<String>) -> bool {
        required.is_subset(&self.skills)
    }

    /// Whether this resource satisfies a type requirement and skill set.
    ///
    /// A `None` type and an empty skill set match every resource.
    pub fn satisfies(&self, resource_type: Option<&str>, skills: &BTreeSet<String>) -> bool {
        resource_type.map_or(true, |t| t == self.resource_type) && self.has_skills(skills)
    }

    /// Whether this resource can take the task.
    pub fn matches(&self, task: &Task) -> bool {
        self.satisfies(task.resource_type.as_deref(), &task.required_skills)
    }
}
