use crate::config::constant::SECS_PER_MIN;
use crate::config::SolverConfig;
use crate::domain::{Problem, Solution, UnassignedReason};
use crate::evaluation::simulate::{simulate, RouteEval};

/// Objective contribution of one simulated route. Hard violations are
/// never averaged into the soft terms; they make the route infinitely
/// costly outright. Empty routes (idle vehicles) cost nothing.
pub fn route_cost(eval: &RouteEval, cfg: &SolverConfig) -> f64 {
    if eval.schedule.is_empty() && eval.feasible {
        return 0.0;
    }
    if !eval.feasible {
        return f64::INFINITY;
    }

    cfg.w_dist * eval.distance_m / 1_000.0
        + cfg.w_wait * eval.wait_s / SECS_PER_MIN
        + cfg.w_capacity_waste * eval.capacity_waste.powi(2)
}

/// Finite badness of an infeasible route, used only to rank least-bad
/// insertion candidates when every candidate is infeasible.
pub fn violation_score(eval: &RouteEval, cfg: &SolverConfig) -> f64 {
    cfg.w_late * eval.lateness_s / SECS_PER_MIN
        + cfg.w_overtime * eval.overtime_s / SECS_PER_MIN
        + eval.excess_kg
}

/// Quadratic priority penalty for every order left out: dropping one
/// priority-5 order costs 25× a priority-1 order.
pub fn unassigned_penalty(
    problem: &Problem,
    unassigned: &[(usize, UnassignedReason)],
) -> f64 {
    unassigned
        .iter()
        .map(|&(order, _)| {
            let p = problem.orders[order].priority as f64;
            problem.config.w_unassigned * p * p
        })
        .sum()
}

/// Full objective: sum of route costs plus the unassigned penalty.
pub fn solution_cost(problem: &Problem, solution: &Solution) -> f64 {
    let routes: f64 = solution
        .routes
        .iter()
        .enumerate()
        .map(|(v, stops)| route_cost(&simulate(problem, v, stops), &problem.config))
        .sum();

    routes + unassigned_penalty(problem, &solution.unassigned)
}
