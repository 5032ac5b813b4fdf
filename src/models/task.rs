//! Task (work item) model.
//!
//! A task is a unit of work spread over an inclusive calendar span and
//! assigned to at most one resource. Its workload is expressed as a
//! [`WorkEstimate`]: total effort hours, a duration in days, or nothing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A work item to be loaded onto a resource.
///
/// The engine only reads tasks; distribution plans propose a new
/// `resource_id` without touching the task itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Owning project.
    pub project_id: Option<String>,
    /// First day of work (inclusive).
    pub start_date: NaiveDate,
    /// Last day of work (inclusive).
    pub end_date: NaiveDate,
    /// Amount of work.
    #[serde(default)]
    pub estimate: WorkEstimate,
    /// Completion percentage (0-100).
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    /// Currently assigned resource.
    pub resource_id: Option<String>,
    /// Resource type the task requires. `None` = any type.
    pub resource_type: Option<String>,
    /// Fixed tasks are never moved by the balancer or recommended for a move.
    #[serde(default)]
    pub is_fixed: bool,
    /// Skills the assignee must hold (all of them).
    #[serde(default)]
    pub required_skills: BTreeSet<String>,
    /// Whether the task accrues hours on Saturdays and Sundays.
    #[serde(default)]
    pub work_on_weekend: bool,
}

/// How much work a task represents.
///
/// Resolved in order: effort hours, then duration, then a caller default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum WorkEstimate {
    /// Total work hours.
    Effort(f64),
    /// Length in days, used as-is when no effort is known.
    Duration(f64),
    #[default]
    Unspecified,
}

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    Cancelled,
}

/// Task priority. Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl WorkEstimate {
    /// Hours of work, falling back to `default_hours` when unspecified.
    pub fn total_hours(&self, default_hours: f64) -> f64 {
        match *self {
            WorkEstimate::Effort(hours) => hours,
            WorkEstimate::Duration(days) => days,
            WorkEstimate::Unspecified => default_hours,
        }
    }

    /// Effort hours if known.
    pub fn effort(&self) -> Option<f64> {
        match *self {
            WorkEstimate::Effort(hours) => Some(hours),
            _ => None,
        }
    }
}

impl Task {
    /// Creates a task spanning `[start_date, end_date]`.
    pub fn new(id: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            project_id: None,
            start_date,
            end_date,
            estimate: WorkEstimate::Unspecified,
            progress: 0.0,
            status: TaskStatus::NotStarted,
            priority: Priority::Medium,
            resource_id: None,
            resource_type: None,
            is_fixed: false,
            required_skills: BTreeSet::new(),
            work_on_weekend: false,
        }
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the owning project.
    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Sets total effort hours.
    pub fn with_effort(mut self, hours: f64) -> Self {
        self.estimate = WorkEstimate::Effort(hours);
        self
    }

    /// Sets duration in days.
    pub fn with_duration(mut self, days: f64) -> Self {
        self.estimate = WorkEstimate::Duration(days);
        self
    }

    /// Sets progress percentage.
    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = progress;
        self
    }

    /// Sets the lifecycle status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Assigns the task to a resource.
    pub fn with_resource(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    /// Sets the required resource type.
    pub fn with_resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    /// Marks the task as fixed to its resource.
    pub fn fixed(mut self) -> Self {
        self.is_fixed = true;
        self
    }

    /// Adds a required skill.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.required_skills.insert(skill.into());
        self
    }

    /// Allows the task to accrue hours on weekends.
    pub fn on_weekends(mut self) -> Self {
        self.work_on_weekend = true;
        self
    }

    /// Whether `date` lies within the task span.
    #[inline]
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Effort hours, or `default_hours` if the task has no effort.
    ///
    /// Plan-level accounting uses effort only; duration is not a substitute.
    pub fn effort_or(&self, default_hours: f64) -> f64 {
        self.estimate.effort().unwrap_or(default_hours)
    }

    /// Whether the task may be moved to another resource.
    pub fn is_movable(&self) -> bool {
        !self.is_fixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn test_task_builder() {
        let task = Task::new("T1", date(6), date(10))
            .with_name("Design review")
            .with_project("P1")
            .with_effort(40.0)
            .with_priority(Priority::High)
            .with_resource("R1")
            .with_resource_type("developer")
            .with_skill("rust")
            .fixed();

        assert_eq!(task.id, "T1");
        assert_eq!(task.name, "Design review");
        assert_eq!(task.project_id.as_deref(), Some("P1"));
        assert_eq!(task.estimate, WorkEstimate::Effort(40.0));
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.resource_id.as_deref(), Some("R1"));
        assert!(task.required_skills.contains("rust"));
        assert!(task.is_fixed);
        assert!(!task.is_movable());
        assert!(!task.work_on_weekend);
    }

    #[test]
    fn test_estimate_fallback_chain() {
        assert!((WorkEstimate::Effort(12.0).total_hours(8.0) - 12.0).abs() < 1e-10);
        assert!((WorkEstimate::Duration(3.0).total_hours(8.0) - 3.0).abs() < 1e-10);
        assert!((WorkEstimate::Unspecified.total_hours(8.0) - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_effort_or_ignores_duration() {
        let task = Task::new("T1", date(6), date(6)).with_duration(3.0);
        assert!((task.effort_or(8.0) - 8.0).abs() < 1e-10);

        let task = task.with_effort(5.0);
        assert!((task.effort_or(8.0) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_is_active_on() {
        let task = Task::new("T1", date(6), date(8));
        assert!(!task.is_active_on(date(5)));
        assert!(task.is_active_on(date(6)));
        assert!(task.is_active_on(date(8)));
        assert!(!task.is_active_on(date(9)));
    }

    #[test]
    fn test_priority_order() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }

    #[test]
    fn test_deserialize_defaults() {
        let task: Task = serde_json::from_str(
            r#"{"id":"T1","start_date":"2025-01-06","end_date":"2025-01-10"}"#,
        )
        .unwrap();
        assert_eq!(task.name, "");
        assert_eq!(task.estimate, WorkEstimate::Unspecified);
        assert!((task.progress - 0.0).abs() < 1e-10);
        assert_eq!(task.status, TaskStatus::NotStarted);
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.resource_id.is_none());
        assert!(!task.is_fixed);
        assert!(task.required_skills.is_empty());
        assert!(!task.work_on_weekend);

        let task: Task = serde_json::from_str(
            r#"{"id":"T2","name":"Review","start_date":"2025-01-06","end_date":"2025-01-06",
                "estimate":{"kind":"effort","value":6.0},"priority":"HIGH"}"#,
        )
        .unwrap();
        assert_eq!(task.estimate, WorkEstimate::Effort(6.0));
        assert_eq!(task.priority, Priority::High);
        assert!((task.progress - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Priority::High).unwrap();
        assert_eq!(json, "\"HIGH\"");
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
        let json = serde_json::to_string(&WorkEstimate::Effort(4.0)).unwrap();
        assert_eq!(json, r#"{"kind":"effort","value":4.0}"#);
    }
}
