use itertools::Itertools;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::domain::{Problem, Solution, UnassignedReason};
use crate::evaluation::{route_cost, simulate, solution_cost, violation_score};

/// Build an initial solution by cheapest feasible insertion.
///
/// Orders are tried in priority-descending, window-start-ascending order;
/// every position of every vehicle's route is a candidate. Orders with no
/// feasible position anywhere are set aside with the reason from the
/// least-bad candidate. O(orders × vehicles × route length).
pub fn construct(problem: &Problem) -> Solution {
    let mut solution = Solution::empty(problem.vehicles.len());
    let fleet_max = problem.fleet_max_capacity();

    // Structurally infeasible orders never get a position evaluated.
    let mut pending: Vec<usize> = Vec::with_capacity(problem.orders.len());
    for (idx, order) in problem.orders.iter().enumerate() {
        if order.weight_kg > fleet_max {
            debug!(
                "Order {} ({} kg) exceeds fleet max capacity {} kg",
                order.id, order.weight_kg, fleet_max
            );
            solution
                .unassigned
                .push((idx, UnassignedReason::ExceedsFleetCapacity));
        } else {
            pending.push(idx);
        }
    }

    let pending: Vec<usize> = pending
        .into_iter()
        .sorted_by(|&a, &b| {
            let oa = &problem.orders[a];
            let ob = &problem.orders[b];
            ob.priority
                .cmp(&oa.priority)
                .then(oa.window_start.cmp(&ob.window_start))
                .then(oa.id.cmp(&ob.id))
        })
        .collect();

    let mut route_costs = vec![0.0_f64; problem.vehicles.len()];

    for order_idx in pending {
        let candidates: Vec<(usize, usize)> = solution
            .routes
            .iter()
            .enumerate()
            .flat_map(|(v, route)| (0..=route.len()).map(move |pos| (v, pos)))
            .collect();

        // Score every insertion point in parallel; the pick below walks the
        // position-ordered results with a strict minimum, so the outcome is
        // deterministic regardless of scheduling.
        let scored: Vec<_> = candidates
            .par_iter()
            .map(|&(v, pos)| {
                let mut stops = solution.routes[v].clone();
                stops.insert(pos, order_idx);
                let eval = simulate(problem, v, &stops);
                let marginal = route_cost(&eval, &problem.config) - route_costs[v];
                (v, pos, eval, marginal)
            })
            .collect();

        let mut best_feasible: Option<(f64, usize, usize)> = None;
        let mut least_bad: Option<(f64, UnassignedReason)> = None;
        for (v, pos, eval, marginal) in &scored {
            if eval.feasible {
                if best_feasible.map_or(true, |(c, _, _)| *marginal < c) {
                    best_feasible = Some((*marginal, *v, *pos));
                }
            } else {
                let score = violation_score(eval, &problem.config);
                let reason = match eval.violation {
                    Some(violation) => violation.reason(),
                    None => UnassignedReason::NoTimeWindowFits,
                };
                if least_bad.map_or(true, |(s, _)| score < s) {
                    least_bad = Some((score, reason));
                }
            }
        }

        match best_feasible {
            Some((marginal, v, pos)) => {
                solution.routes[v].insert(pos, order_idx);
                route_costs[v] += marginal;
                debug!(
                    "Inserted order {} into vehicle {} at position {} (marginal {:.2})",
                    problem.orders[order_idx].id, problem.vehicles[v].id, pos, marginal
                );
            }
            None => {
                let reason = least_bad
                    .map(|(_, r)| r)
                    .unwrap_or(UnassignedReason::NoTimeWindowFits);
                debug!(
                    "Order {} has no feasible insertion: {}",
                    problem.orders[order_idx].id, reason
                );
                solution.unassigned.push((order_idx, reason));
            }
        }
    }

    solution.cost = solution_cost(problem, &solution);
    info!(
        "Greedy construction: {} of {} orders routed, cost {:.2}",
        solution.assigned_count(),
        problem.orders.len(),
        solution.cost
    );
    solution
}

#[cfg(test)]
mod tests {
    use crate::fixtures::test_problem;

    use super::*;

    #[test]
    fn routes_everything_that_fits() {
        let problem = test_problem(
            &[1_000.0],
            &[
                (100.0, 1, "08:00", "17:00"),
                (200.0, 2, "08:00", "17:00"),
                (300.0, 3, "08:00", "17:00"),
            ],
        );
        let solution = construct(&problem);
        assert_eq!(solution.assigned_count(), 3);
        assert!(solution.unassigned.is_empty());
        assert!(solution.cost.is_finite());
    }

    #[test]
    fn capacity_split_leaves_exactly_one_order_behind() {
        // Boundary scenario: one 500 kg vehicle, two 300 kg orders.
        let problem = test_problem(
            &[500.0],
            &[(300.0, 1, "09:00", "16:00"), (300.0, 1, "09:00", "16:00")],
        );
        let solution = construct(&problem);
        assert_eq!(solution.assigned_count(), 1);
        assert_eq!(solution.unassigned.len(), 1);
        assert_eq!(
            solution.unassigned[0].1,
            UnassignedReason::NoRemainingCapacity
        );
    }

    #[test]
    fn overweight_order_is_rejected_before_any_insertion() {
        let problem = test_problem(&[1_000.0], &[(2_000.0, 5, "08:00", "17:00")]);
        let solution = construct(&problem);
        assert_eq!(solution.assigned_count(), 0);
        assert_eq!(
            solution.unassigned,
            vec![(0, UnassignedReason::ExceedsFleetCapacity)]
        );
    }

    #[test]
    fn unreachable_window_yields_time_window_reason() {
        // Window closes one minute after the shift starts; travel from the
        // depot takes several minutes.
        let problem = test_problem(&[1_000.0], &[(100.0, 1, "08:00", "08:01")]);
        let solution = construct(&problem);
        assert!(solution.routes[0].is_empty());
        assert_eq!(
            solution.unassigned,
            vec![(0, UnassignedReason::NoTimeWindowFits)]
        );
    }

    #[test]
    fn higher_priority_order_wins_the_last_slot() {
        // Only one of the two orders fits; the priority-5 one must be it.
        let problem = test_problem(
            &[500.0],
            &[(400.0, 1, "09:00", "16:00"), (400.0, 5, "09:00", "16:00")],
        );
        let solution = construct(&problem);
        assert_eq!(solution.routes[0], vec![1]);
        assert_eq!(solution.unassigned[0].0, 0);
    }

    #[test]
    fn construction_is_deterministic() {
        let problem = test_problem(
            &[500.0, 800.0],
            &[
                (100.0, 2, "09:00", "16:00"),
                (150.0, 2, "09:00", "16:00"),
                (200.0, 1, "10:00", "15:00"),
                (250.0, 3, "08:30", "12:00"),
            ],
        );
        let a = construct(&problem);
        let b = construct(&problem);
        assert_eq!(a.routes, b.routes);
        assert_eq!(a.unassigned, b.unassigned);
        assert_eq!(a.cost, b.cost);
    }
}
