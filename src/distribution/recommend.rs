//! Move recommendation generator.
//!
//! Proposes single-task moves off days where a resource runs above a load
//! threshold. Nothing is applied; callers decide which moves to commit.
//!
//! # Algorithm
//!
//! 1. Compute each resource's daily records.
//! 2. Sources: resources with any day above `threshold`.
//!    Targets: resources whose average load is below `threshold * ratio`.
//! 3. For every over-threshold day, every contributing task that is not
//!    fixed and not `High` priority is matched to the target with the
//!    lowest average load that can absorb the task's hours that day
//!    without exceeding `threshold`.
//!
//! Targets are evaluated against their original loads; several
//! recommendations may name the same target day.

use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::load::LoadCalculator;
use crate::models::{round2, MoveRecommendation, Priority, Resource, ResourceLoadSummary, Task};

/// Generates advisory moves for days loaded above `threshold` percent.
pub fn generate_move_recommendations(
    calculator: &LoadCalculator,
    tasks: &[Task],
    resources: &[Resource],
    start: NaiveDate,
    end: NaiveDate,
    threshold: f64,
) -> Vec<MoveRecommendation> {
    let config = calculator.config();
    let summaries = calculator.resource_summaries(tasks, resources, start, end);
    let tasks_by_id: HashMap<&str, &Task> = tasks.iter().map(|t| (t.id.as_str(), t)).collect();
    let underutilized_below = threshold * config.recommendations.underutilized_ratio;

    let pairs: Vec<(&Resource, &ResourceLoadSummary)> = resources.iter().zip(&summaries).collect();
    let targets: Vec<&(&Resource, &ResourceLoadSummary)> = pairs
        .iter()
        .filter(|(_, s)| s.avg_load < underutilized_below)
        .collect();

    let mut recommendations = Vec::new();
    for (source, summary) in pairs.iter().filter(|(_, s)| s.exceeds(threshold)) {
        let source_capacity = source.daily_capacity_or(config.capacity.default_daily_capacity);

        for record in summary.load_by_date.iter().filter(|r| r.load > threshold) {
            for contribution in record.tasks.iter().filter(|c| c.hours > 0.0) {
                let Some(task) = tasks_by_id.get(contribution.task_id.as_str()) else {
                    continue;
                };
                if !task.is_movable() || task.priority == Priority::High {
                    continue;
                }

                let best = targets
                    .iter()
                    .filter(|(candidate, _)| candidate.id != source.id && candidate.matches(task))
                    .filter(|(_, candidate_summary)| {
                        candidate_summary
                            .record_on(record.date)
                            .filter(|r| r.capacity > 0.0)
                            .is_some_and(|r| {
                                r.load + contribution.hours / r.capacity * 100.0 <= threshold
                            })
                    })
                    .min_by(|(_, a), (_, b)| a.avg_load.total_cmp(&b.avg_load));

                let Some((target, target_summary)) = best else {
                    warn!(
                        task = %task.id,
                        date = %record.date,
                        "no resource can absorb task"
                    );
                    continue;
                };

                let expected_load_reduction = if source_capacity > 0.0 {
                    round2(contribution.hours / source_capacity * 100.0)
                } else {
                    0.0
                };

                recommendations.push(MoveRecommendation {
                    task_id: task.id.clone(),
                    task_name: task.name.clone(),
                    current_resource_id: source.id.clone(),
                    suggested_resource_id: target.id.clone(),
                    overload_date: record.date,
                    contribution_hours: contribution.hours,
                    expected_load_reduction,
                    reason: format!(
                        "{} is at {:.1}% on {}; {} averages {:.1}%",
                        source.name, record.load, record.date, target.name, target_summary.avg_load
                    ),
                });
            }
        }
    }

    info!(
        threshold,
        recommendations = recommendations.len(),
        "generated move recommendations"
    );
    recommendations
}
