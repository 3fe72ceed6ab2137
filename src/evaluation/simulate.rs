use chrono::Timelike;

use crate::distance::travel_time_s;
use crate::domain::{Problem, UnassignedReason};

/// First hard-constraint breach found while walking a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Capacity,
    TimeWindow,
    Workday,
}

impl Violation {
    pub fn reason(self) -> UnassignedReason {
        match self {
            Violation::Capacity => UnassignedReason::NoRemainingCapacity,
            Violation::TimeWindow => UnassignedReason::NoTimeWindowFits,
            Violation::Workday => UnassignedReason::ExceedsWorkday,
        }
    }
}

/// Computed schedule entry for one stop. Arrival is clamped to the window
/// start, so a reported arrival always lies inside the window when the
/// route is feasible.
#[derive(Debug, Clone, Copy)]
pub struct StopTiming {
    pub order: usize,
    pub arrival_s: f64,
    pub departure_s: f64,
    pub load_after_kg: f64,
}

/// Everything the cost model needs to know about one vehicle's route.
#[derive(Debug, Clone, Default)]
pub struct RouteEval {
    pub feasible: bool,
    pub violation: Option<Violation>,
    pub distance_m: f64,
    pub wait_s: f64,
    pub lateness_s: f64,
    pub overtime_s: f64,
    pub excess_kg: f64,
    pub load_kg: f64,
    pub capacity_waste: f64,
    pub schedule: Vec<StopTiming>,
}

/// Walk `stops` in order from the vehicle's depot and shift start,
/// accumulating travel, wait, load, and any hard violations. The single
/// source of truth for feasibility and route cost inputs.
pub fn simulate(problem: &Problem, vehicle: usize, stops: &[usize]) -> RouteEval {
    let mut eval = RouteEval {
        feasible: true,
        ..RouteEval::default()
    };
    if stops.is_empty() {
        return eval;
    }

    let veh = &problem.vehicles[vehicle];
    let cfg = &problem.config;
    let shift_start_s = veh.shift_start.num_seconds_from_midnight() as f64;

    // Capacity is a hard constraint on the whole assigned load; an
    // overloaded route is infeasible before the first metre is driven.
    eval.load_kg = stops.iter().map(|&o| problem.orders[o].weight_kg).sum();
    if eval.load_kg > veh.capacity_kg {
        eval.feasible = false;
        eval.violation = Some(Violation::Capacity);
        eval.excess_kg = eval.load_kg - veh.capacity_kg;
        return eval;
    }

    let mut clock = shift_start_s;
    let mut load = 0.0;
    let mut prev_node = problem.depot_node(vehicle);

    for &order_idx in stops {
        let order = &problem.orders[order_idx];
        let node = problem.order_node(order_idx);

        let leg = problem.leg_m(prev_node, node);
        eval.distance_m += leg;
        clock += travel_time_s(leg, cfg.average_speed_kmh);

        if clock < order.window_start_s() {
            eval.wait_s += order.window_start_s() - clock;
            clock = order.window_start_s();
        } else if clock > order.window_end_s() {
            eval.lateness_s += clock - order.window_end_s();
            eval.feasible = false;
            eval.violation.get_or_insert(Violation::TimeWindow);
        }

        let arrival = clock;
        clock += order.service_s;
        load += order.weight_kg;

        eval.schedule.push(StopTiming {
            order: order_idx,
            arrival_s: arrival,
            departure_s: clock,
            load_after_kg: load,
        });

        prev_node = node;
    }

    let elapsed = clock - shift_start_s;
    let workday = cfg.max_workday_s();
    if elapsed > workday {
        eval.overtime_s = elapsed - workday;
        eval.feasible = false;
        eval.violation.get_or_insert(Violation::Workday);
    }

    eval.capacity_waste = ((veh.capacity_kg - eval.load_kg) / veh.capacity_kg).max(0.0);
    eval
}
