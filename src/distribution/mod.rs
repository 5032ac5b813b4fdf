//! Task distribution across resources.
//!
//! # Pipeline
//!
//! 1. `initial`: greedy priority-ordered assignment to the least-loaded
//!    matching resource.
//! 2. `balancer`: bounded local search moving low-priority entries off
//!    overloaded resources.
//! 3. `recommend`: advisory moves derived from daily loads of an existing
//!    assignment.
//!
//! `DistributionOptimizer` bundles the three behind one configured facade.

mod balancer;
mod initial;
mod recommend;

pub use balancer::{rebalance, BalanceOutcome, LoadLedger};
pub use initial::build_initial_distribution;
pub use recommend::generate_move_recommendations;

use chrono::NaiveDate;
use tracing::info;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::load::LoadCalculator;
use crate::models::{DistributionConstraints, DistributionPlan, MoveRecommendation, Resource, Task};

/// Configured entry point for building, balancing and reviewing plans.
///
/// # Example
///
/// ```
/// use u_workload::distribution::DistributionOptimizer;
/// use u_workload::models::{DistributionConstraints, Priority, Resource, Task};
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
/// let tasks = vec![
///     Task::new("T1", day, day).with_effort(8.0).with_priority(Priority::High),
///     Task::new("T2", day, day).with_effort(4.0),
/// ];
/// let resources = vec![Resource::new("R1", "developer"), Resource::new("R2", "developer")];
///
/// let optimizer = DistributionOptimizer::new()
///     .with_constraints(DistributionConstraints::new().with_fixed("T2", "R2"));
/// let outcome = optimizer.optimize(&tasks, &resources).unwrap();
///
/// assert_eq!(outcome.plan.len(), 2);
/// assert_eq!(outcome.plan.entry("T2").unwrap().resource_id, "R2");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DistributionOptimizer {
    config: EngineConfig,
    constraints: DistributionConstraints,
}

impl DistributionOptimizer {
    /// Creates an optimizer with default configuration and no pins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets fixed task-to-resource assignments.
    pub fn with_constraints(mut self, constraints: DistributionConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Greedy initial plan. See [`build_initial_distribution`].
    pub fn initial_distribution(&self, tasks: &[Task], resources: &[Resource]) -> Result<DistributionPlan> {
        build_initial_distribution(tasks, resources, &self.constraints, &self.config.capacity)
    }

    /// Rebalances an existing plan. See [`rebalance`].
    pub fn rebalance(&self, plan: DistributionPlan, resources: &[Resource]) -> BalanceOutcome {
        rebalance(plan, resources, &self.config.balancer)
    }

    /// Initial distribution followed by rebalancing.
    pub fn optimize(&self, tasks: &[Task], resources: &[Resource]) -> Result<BalanceOutcome> {
        let plan = self.initial_distribution(tasks, resources)?;
        let outcome = self.rebalance(plan, resources);
        info!(
            tasks = outcome.plan.len(),
            iterations = outcome.iterations,
            moves = outcome.moves,
            "distribution plan complete"
        );
        Ok(outcome)
    }

    /// Move recommendations at the configured threshold.
    pub fn recommend_moves(
        &self,
        tasks: &[Task],
        resources: &[Resource],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<MoveRecommendation> {
        self.recommend_moves_with_threshold(
            tasks,
            resources,
            start,
            end,
            self.config.recommendations.threshold,
        )
    }

    /// Move recommendations at an explicit threshold.
    pub fn recommend_moves_with_threshold(
        &self,
        tasks: &[Task],
        resources: &[Resource],
        start: NaiveDate,
        end: NaiveDate,
        threshold: f64,
    ) -> Vec<MoveRecommendation> {
        let calculator = LoadCalculator::new().with_config(self.config.clone());
        generate_move_recommendations(&calculator, tasks, resources, start, end, threshold)
    }
}
