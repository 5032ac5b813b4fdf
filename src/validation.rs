//! Input validation for workload problems.
//!
//! Checks structural integrity of tasks and resources before load
//! calculation or distribution. Detects:
//! - Duplicate IDs
//! - Inverted date ranges
//! - Negative effort or duration
//! - Progress outside 0–100
//! - Negative capacities
//! - Assignments to unknown resources
//!
//! Every check runs; all findings are returned together.

use crate::models::{Resource, Task, WorkEstimate};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A task starts after it ends.
    InvalidDateRange,
    /// Effort or duration below zero.
    NegativeEstimate,
    /// Progress outside 0–100.
    InvalidProgress,
    /// A resource capacity below zero.
    NegativeCapacity,
    /// A task is assigned to a resource that doesn't exist.
    InvalidResourceReference,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates tasks and resources.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(tasks: &[Task], resources: &[Resource]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut resource_ids = HashSet::new();
    for r in resources {
        if !resource_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate resource ID: {}", r.id),
            ));
        }

        let capacities = [
            ("capacity", Some(r.capacity)),
            ("daily capacity", r.daily_capacity),
            ("weekend capacity", Some(r.weekend_capacity)),
        ];
        for (label, value) in capacities {
            if let Some(value) = value.filter(|v| *v < 0.0) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NegativeCapacity,
                    format!("Resource '{}' has negative {label}: {value}", r.id),
                ));
            }
        }
    }

    let mut task_ids = HashSet::new();
    for task in tasks {
        if !task_ids.insert(task.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id),
            ));
        }

        if task.start_date > task.end_date {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDateRange,
                format!(
                    "Task '{}' starts {} after it ends {}",
                    task.id, task.start_date, task.end_date
                ),
            ));
        }

        match task.estimate {
            WorkEstimate::Effort(hours) if hours < 0.0 => errors.push(ValidationError::new(
                ValidationErrorKind::NegativeEstimate,
                format!("Task '{}' has negative effort: {hours}", task.id),
            )),
            WorkEstimate::Duration(days) if days < 0.0 => errors.push(ValidationError::new(
                ValidationErrorKind::NegativeEstimate,
                format!("Task '{}' has negative duration: {days}", task.id),
            )),
            _ => {}
        }

        if !(0.0..=100.0).contains(&task.progress) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidProgress,
                format!("Task '{}' has progress {} outside 0-100", task.id, task.progress),
            ));
        }
    }

    for task in tasks {
        if let Some(resource_id) = task.resource_id.as_deref() {
            if !resource_ids.contains(resource_id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidResourceReference,
                    format!(
                        "Task '{}' references unknown resource '{}'",
                        task.id, resource_id
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
