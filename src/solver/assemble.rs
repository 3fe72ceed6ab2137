use chrono::NaiveTime;
use serde::Serialize;

use crate::config::constant::SECS_PER_MIN;
use crate::domain::{CostBreakdown, Problem, Solution};
use crate::evaluation::{route_cost, simulate, unassigned_penalty};

#[derive(Debug, Serialize)]
pub struct StopReport {
    pub order_id: String,
    pub arrival: NaiveTime,
    pub departure: NaiveTime,
    pub load_after_kg: f64,
}

#[derive(Debug, Serialize)]
pub struct RouteReport {
    pub vehicle_id: String,
    pub stops: Vec<StopReport>,
    pub distance_km: f64,
    pub load_kg: f64,
    /// Assigned load as a fraction of capacity.
    pub load_factor: f64,
    pub wait_min: f64,
    /// Shift start to last departure.
    pub duration_min: f64,
}

#[derive(Debug, Serialize)]
pub struct UnassignedReport {
    pub order_id: String,
    pub reason: String,
}

/// The caller-facing account of a finished solve: every input order shows
/// up exactly once, routed with a schedule or unassigned with a reason.
#[derive(Debug, Serialize)]
pub struct SolutionReport {
    pub routes: Vec<RouteReport>,
    pub unassigned: Vec<UnassignedReport>,
    pub totals: CostBreakdown,
    pub orders_total: usize,
    pub orders_assigned: usize,
    /// Assigned orders over input orders; 1.0 for an empty order list.
    pub coverage: f64,
    pub unassigned_priority_sum: u64,
}

fn time_of_day(seconds: f64) -> NaiveTime {
    let s = (seconds.max(0.0) as u32) % 86_400;
    NaiveTime::from_num_seconds_from_midnight_opt(s, 0).unwrap_or_default()
}

/// Shape the final solution into per-vehicle and global metrics. Pure data
/// shaping; all numbers come from the same simulator the solver used.
pub fn assemble(problem: &Problem, solution: &Solution) -> SolutionReport {
    let mut totals = CostBreakdown::default();
    let mut routes = Vec::with_capacity(problem.vehicles.len());

    for (v, stops) in solution.routes.iter().enumerate() {
        let vehicle = &problem.vehicles[v];
        let eval = simulate(problem, v, stops);
        let cost = route_cost(&eval, &problem.config);

        totals.accumulate(&CostBreakdown {
            distance_m: eval.distance_m,
            wait_s: eval.wait_s,
            lateness_s: eval.lateness_s,
            overtime_s: eval.overtime_s,
            capacity_waste: if stops.is_empty() {
                0.0
            } else {
                eval.capacity_waste
            },
            unassigned_penalty: 0.0,
            total: cost,
        });

        let duration_s = eval
            .schedule
            .last()
            .map(|stop| {
                use chrono::Timelike;
                stop.departure_s - vehicle.shift_start.num_seconds_from_midnight() as f64
            })
            .unwrap_or(0.0);

        routes.push(RouteReport {
            vehicle_id: vehicle.id.clone(),
            stops: eval
                .schedule
                .iter()
                .map(|stop| StopReport {
                    order_id: problem.orders[stop.order].id.clone(),
                    arrival: time_of_day(stop.arrival_s),
                    departure: time_of_day(stop.departure_s),
                    load_after_kg: stop.load_after_kg,
                })
                .collect(),
            distance_km: eval.distance_m / 1_000.0,
            load_kg: eval.load_kg,
            load_factor: eval.load_kg / vehicle.capacity_kg,
            wait_min: eval.wait_s / SECS_PER_MIN,
            duration_min: duration_s / SECS_PER_MIN,
        });
    }

    let penalty = unassigned_penalty(problem, &solution.unassigned);
    totals.unassigned_penalty = penalty;
    totals.total += penalty;

    let orders_total = problem.orders.len();
    let orders_assigned = solution.assigned_count();

    SolutionReport {
        routes,
        unassigned: solution
            .unassigned
            .iter()
            .map(|&(order, reason)| UnassignedReport {
                order_id: problem.orders[order].id.clone(),
                reason: reason.to_string(),
            })
            .collect(),
        totals,
        orders_total,
        orders_assigned,
        coverage: if orders_total == 0 {
            1.0
        } else {
            orders_assigned as f64 / orders_total as f64
        },
        unassigned_priority_sum: solution
            .unassigned
            .iter()
            .map(|&(order, _)| problem.orders[order].priority as u64)
            .sum(),
    }
}
