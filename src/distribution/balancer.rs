//! Redistribution balancer.
//!
//! # Algorithm
//!
//! Greedy local search over a distribution plan, at most `max_iterations`
//! rounds:
//! 1. Load% per resource = assigned effort / capacity * 100.
//! 2. Overloaded: load > avg * 1.2. Underutilized: load < avg * 0.8.
//! 3. For the first overloaded resource that has a movable entry, take its
//!    lowest-priority movable entry and move it to the least-loaded
//!    eligible underutilized resource. Only that one entry is tried per
//!    overloaded resource.
//! 4. One move per round; a round without a move ends the search.
//!
//! There is no optimality guarantee. Fixed entries never move and the
//! number of entries never changes.
//!
//! # Reference
//! Aarts & Lenstra (1997), "Local Search in Combinatorial Optimization", Ch. 1

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::config::BalancerConfig;
use crate::models::{DistributionPlan, Resource};

/// Result of a balancing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceOutcome {
    pub plan: DistributionPlan,
    /// Rounds executed, including the final round without a move.
    pub iterations: usize,
    /// Entries moved.
    pub moves: usize,
}

/// Running load percentages keyed by resource id.
///
/// Owned by a single balancing run; moves update it in place. Ordered so
/// that the average is summed identically on every run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadLedger {
    loads: BTreeMap<String, f64>,
    capacities: BTreeMap<String, f64>,
}

impl LoadLedger {
    /// Computes load percentages for every resource from a plan.
    ///
    /// Entries on unknown resources are ignored. Zero capacity gives 0%.
    pub fn from_plan(plan: &DistributionPlan, resources: &[Resource]) -> Self {
        let mut ledger = Self::default();
        for resource in resources {
            ledger
                .capacities
                .insert(resource.id.clone(), resource.capacity);
            ledger.loads.insert(
                resource.id.clone(),
                percent_of(plan.assigned_effort(&resource.id), resource.capacity),
            );
        }
        ledger
    }

    /// Load percentage of a resource (0 if unknown).
    pub fn load(&self, resource_id: &str) -> f64 {
        self.loads.get(resource_id).copied().unwrap_or_default()
    }

    /// Mean load over all resources.
    pub fn average(&self) -> f64 {
        if self.loads.is_empty() {
            0.0
        } else {
            self.loads.values().sum::<f64>() / self.loads.len() as f64
        }
    }

    /// Moves `effort` hours from one resource to another.
    pub fn transfer(&mut self, from: &str, to: &str, effort: f64) {
        for (id, sign) in [(from, -1.0), (to, 1.0)] {
            let capacity = self.capacities.get(id).copied().unwrap_or_default();
            if let Some(load) = self.loads.get_mut(id) {
                *load += sign * percent_of(effort, capacity);
            }
        }
    }
}

fn percent_of(effort: f64, capacity: f64) -> f64 {
    if capacity > 0.0 {
        effort / capacity * 100.0
    } else {
        0.0
    }
}

/// Rebalances a plan across `resources`.
///
/// Resources with zero capacity never receive moved entries.
pub fn rebalance(
    mut plan: DistributionPlan,
    resources: &[Resource],
    config: &BalancerConfig,
) -> BalanceOutcome {
    let mut ledger = LoadLedger::from_plan(&plan, resources);
    let mut iterations = 0;
    let mut moves = 0;

    while iterations < config.max_iterations {
        iterations += 1;

        let avg = ledger.average();
        let overloaded: Vec<&Resource> = resources
            .iter()
            .filter(|r| ledger.load(&r.id) > avg * config.overload_multiplier)
            .collect();
        let underutilized: Vec<&Resource> = resources
            .iter()
            .filter(|r| r.capacity > 0.0 && ledger.load(&r.id) < avg * config.underload_multiplier)
            .collect();

        let mut improved = false;
        for source in overloaded {
            let mut movable: Vec<usize> = plan
                .entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.resource_id == source.id && !e.is_fixed)
                .map(|(i, _)| i)
                .collect();
            movable.sort_by_key(|&i| plan.entries[i].priority);

            let Some(&idx) = movable.first() else {
                continue;
            };

            let entry = &plan.entries[idx];
            let target = underutilized
                .iter()
                .filter(|r| r.id != source.id && entry.fits(r))
                .min_by(|a, b| ledger.load(&a.id).total_cmp(&ledger.load(&b.id)));

            if let Some(target) = target {
                let effort = entry.effort;
                let entry = &mut plan.entries[idx];
                debug!(
                    task = %entry.task_id,
                    from = %source.id,
                    to = %target.id,
                    iteration = iterations,
                    "rebalanced task"
                );
                entry.reason = format!("rebalanced from {} to {}", source.name, target.name);
                entry.resource_id = target.id.clone();
                entry.resource_name = target.name.clone();
                ledger.transfer(&source.id, &target.id, effort);
                moves += 1;
                improved = true;
                break;
            }
        }

        if !improved {
            break;
        }
    }

    BalanceOutcome {
        plan,
        iterations,
        moves,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DistributionPlanEntry, Priority, Task};
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn resource(id: &str, capacity: f64) -> Resource {
        Resource::new(id, "developer")
            .with_name(format!("{id}-name"))
            .with_capacity(capacity)
    }

    fn entry(id: &str, resource: &Resource, effort: f64, priority: Priority) -> DistributionPlanEntry {
        let task = Task::new(id, date(6), date(10)).with_priority(priority);
        DistributionPlanEntry::new(&task, resource, effort, false, "automatic assignment")
    }

    #[test]
    fn test_ledger_from_plan() {
        let r1 = resource("R1", 40.0);
        let r2 = resource("R2", 0.0);
        let mut plan = DistributionPlan::new();
        plan.push(entry("T1", &r1, 20.0, Priority::Medium));
        plan.push(entry("T2", &r2, 20.0, Priority::Medium));

        let ledger = LoadLedger::from_plan(&plan, &[r1, r2]);
        assert!((ledger.load("R1") - 50.0).abs() < 1e-10);
        assert!((ledger.load("R2") - 0.0).abs() < 1e-10);
        assert!((ledger.average() - 25.0).abs() < 1e-10);
    }

    #[test]
    fn test_moves_lowest_priority_first() {
        let r1 = resource("R1", 40.0);
        let r2 = resource("R2", 40.0);
        let mut plan = DistributionPlan::new();
        plan.push(entry("high", &r1, 16.0, Priority::High));
        plan.push(entry("low", &r1, 16.0, Priority::Low));
        plan.push(entry("medium", &r1, 16.0, Priority::Medium));

        let config = BalancerConfig {
            max_iterations: 1,
            ..BalancerConfig::default()
        };
        let outcome = rebalance(plan, &[r1, r2], &config);

        assert_eq!(outcome.moves, 1);
        let moved = outcome.plan.entry("low").unwrap();
        assert_eq!(moved.resource_id, "R2");
        assert_eq!(moved.resource_name, "R2-name");
        assert_eq!(moved.reason, "rebalanced from R1-name to R2-name");
        assert_eq!(outcome.plan.entry("high").unwrap().resource_id, "R1");
    }

    #[test]
    fn test_converges_and_stops_early() {
        let r1 = resource("R1", 40.0);
        let r2 = resource("R2", 40.0);
        let mut plan = DistributionPlan::new();
        for i in 0..4 {
            plan.push(entry(&format!("T{i}"), &r1, 10.0, Priority::Medium));
        }

        let outcome = rebalance(plan, &[r1, r2], &BalancerConfig::default());
        // 100/0 → 75/25 → 50/50, then no resource exceeds 1.2 * avg
        assert_eq!(outcome.moves, 2);
        assert_eq!(outcome.iterations, 3);
        assert_eq!(outcome.plan.entries_for_resource("R2").len(), 2);
    }

    #[test]
    fn test_fixed_entries_stay() {
        let r1 = resource("R1", 40.0);
        let r2 = resource("R2", 40.0);
        let mut plan = DistributionPlan::new();
        let task = Task::new("pinned", date(6), date(10));
        plan.push(DistributionPlanEntry::new(&task, &r1, 40.0, true, "fixed assignment"));

        let outcome = rebalance(plan.clone(), &[r1, r2], &BalancerConfig::default());
        assert_eq!(outcome.moves, 0);
        assert_eq!(outcome.iterations, 1);
        assert_eq!(outcome.plan, plan);
    }

    #[test]
    fn test_respects_skills() {
        let r1 = resource("R1", 40.0).with_skill("rust");
        let r2 = resource("R2", 40.0);
        let task = Task::new("T1", date(6), date(10)).with_skill("rust");
        let mut plan = DistributionPlan::new();
        plan.push(DistributionPlanEntry::new(&task, &r1, 30.0, false, "automatic assignment"));

        let outcome = rebalance(plan, &[r1, r2], &BalancerConfig::default());
        assert_eq!(outcome.moves, 0);
        assert_eq!(outcome.plan.entry("T1").unwrap().resource_id, "R1");
    }

    #[test]
    fn test_zero_capacity_never_receives() {
        let r1 = resource("R1", 40.0);
        let r2 = resource("R2", 0.0);
        let mut plan = DistributionPlan::new();
        plan.push(entry("T1", &r1, 30.0, Priority::Low));

        let outcome = rebalance(plan, &[r1, r2], &BalancerConfig::default());
        assert_eq!(outcome.moves, 0);
    }

    #[test]
    fn test_only_first_movable_entry_is_tried() {
        // R1's lowest-priority entry needs a skill nobody else has;
        // its other entries are never considered.
        let r1 = resource("R1", 40.0).with_skill("cobol");
        let r2 = resource("R2", 40.0);
        let stuck = Task::new("stuck", date(6), date(10))
            .with_priority(Priority::Low)
            .with_skill("cobol");
        let mut plan = DistributionPlan::new();
        plan.push(DistributionPlanEntry::new(&stuck, &r1, 10.0, false, "automatic assignment"));
        plan.push(entry("free", &r1, 20.0, Priority::High));

        let outcome = rebalance(plan, &[r1, r2], &BalancerConfig::default());
        assert_eq!(outcome.moves, 0);
        assert_eq!(outcome.plan.entry("free").unwrap().resource_id, "R1");
    }

    #[test]
    fn test_ledger_tracks_plan() {
        let resources = vec![resource("R1", 40.0), resource("R2", 20.0), resource("R3", 80.0)];
        let mut plan = DistributionPlan::new();
        for i in 0..6 {
            plan.push(entry(&format!("T{i}"), &resources[0], 8.0, Priority::Medium));
        }

        let mut ledger = LoadLedger::from_plan(&plan, &resources);
        ledger.transfer("R1", "R3", 8.0);
        plan.entries[0].resource_id = "R3".into();
        let recomputed = LoadLedger::from_plan(&plan, &resources);
        for r in &resources {
            assert!((ledger.load(&r.id) - recomputed.load(&r.id)).abs() < 1e-10);
        }
    }

    #[test]
    fn test_random_plans_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let resources: Vec<Resource> = (0..rng.random_range(2..6))
                .map(|i| resource(&format!("R{i}"), rng.random_range(0..5) as f64 * 20.0))
                .collect();
            let mut plan = DistributionPlan::new();
            for i in 0..rng.random_range(1..20) {
                let owner = &resources[rng.random_range(0..resources.len())];
                let priority = [Priority::Low, Priority::Medium, Priority::High][rng.random_range(0..3usize)];
                let mut e = entry(&format!("T{i}"), owner, rng.random_range(1..20) as f64, priority);
                e.is_fixed = rng.random_bool(0.3);
                plan.push(e);
            }

            let config = BalancerConfig::default();
            let outcome = rebalance(plan.clone(), &resources, &config);

            assert_eq!(outcome.plan.len(), plan.len());
            assert!(outcome.iterations <= config.max_iterations);
            assert!(outcome.moves <= outcome.iterations);
            for (before, after) in plan.entries.iter().zip(&outcome.plan.entries) {
                assert_eq!(before.task_id, after.task_id);
                if before.is_fixed {
                    assert_eq!(before.resource_id, after.resource_id);
                }
            }

            let again = rebalance(plan, &resources, &config);
            assert_eq!(again, outcome);
        }
    }
}
