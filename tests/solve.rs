use chrono::NaiveTime;
use chrono::Timelike;

use fleet_routing::evaluation::simulate;
use fleet_routing::fixtures::generate_scenario;
use fleet_routing::solver::construct;
use fleet_routing::{
    build_problem, optimize, solve, Coordinate, InputError, Order, SolverConfig, Vehicle,
};

fn config(max_iterations: usize, random_seed: u64) -> SolverConfig {
    SolverConfig {
        max_iterations,
        random_seed,
        ..SolverConfig::default()
    }
}

fn vehicle(id: &str, capacity_kg: f64) -> Vehicle {
    Vehicle {
        id: id.into(),
        capacity_kg,
        depot: Coordinate::new(19.4326, -99.1332),
        shift_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
    }
}

fn order(id: &str, weight_kg: f64, priority: u32, start: &str, end: &str) -> Order {
    Order {
        id: id.into(),
        location: Coordinate::new(19.4526, -99.1332),
        weight_kg,
        priority,
        window_start: NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
        window_end: NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
        service_s: 0.0,
    }
}

#[test]
fn every_order_is_accounted_for_exactly_once() {
    let (vehicles, orders) = generate_scenario(4, 25, 11);
    let problem = build_problem(vehicles, orders, config(2_000, 5)).unwrap();
    let best = optimize(&problem, construct(&problem));

    let mut seen = vec![0_usize; problem.orders.len()];
    for route in &best.routes {
        for &o in route {
            seen[o] += 1;
        }
    }
    for &(o, _) in &best.unassigned {
        seen[o] += 1;
    }
    assert!(
        seen.iter().all(|&count| count == 1),
        "orders duplicated or dropped: {seen:?}"
    );
}

#[test]
fn final_routes_satisfy_every_hard_constraint() {
    let (vehicles, orders) = generate_scenario(5, 30, 23);
    let problem = build_problem(vehicles, orders, config(3_000, 17)).unwrap();
    let best = optimize(&problem, construct(&problem));

    for (v, stops) in best.routes.iter().enumerate() {
        let eval = simulate(&problem, v, stops);
        assert!(eval.feasible, "vehicle {v} route infeasible in final solution");
        assert!(eval.load_kg <= problem.vehicles[v].capacity_kg);

        let shift_start = problem.vehicles[v].shift_start.num_seconds_from_midnight() as f64;
        for stop in &eval.schedule {
            let o = &problem.orders[stop.order];
            assert!(stop.arrival_s >= o.window_start.num_seconds_from_midnight() as f64);
            assert!(stop.arrival_s <= o.window_end.num_seconds_from_midnight() as f64);
        }
        if let Some(last) = eval.schedule.last() {
            assert!(last.departure_s - shift_start <= problem.config.max_workday_s());
        }
    }
}

#[test]
fn identical_inputs_and_seed_reproduce_the_solution() {
    let (vehicles, orders) = generate_scenario(3, 18, 42);
    let a = solve(vehicles.clone(), orders.clone(), config(1_500, 9)).unwrap();
    let b = solve(vehicles, orders, config(1_500, 9)).unwrap();
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn drops_the_lower_priority_order_when_only_one_fits() {
    let vehicles = vec![vehicle("v1", 500.0)];
    let orders = vec![
        order("low", 400.0, 1, "09:00", "16:00"),
        order("high", 400.0, 5, "09:00", "16:00"),
    ];
    let report = solve(vehicles, orders, config(1_000, 3)).unwrap();
    assert_eq!(report.orders_assigned, 1);
    assert_eq!(report.unassigned.len(), 1);
    assert_eq!(report.unassigned[0].order_id, "low");
}

#[test]
fn capacity_boundary_leaves_exactly_one_order_with_capacity_reason() {
    let vehicles = vec![vehicle("v1", 500.0)];
    let orders = vec![
        order("a", 300.0, 1, "09:00", "16:00"),
        order("b", 300.0, 1, "09:00", "16:00"),
    ];
    let report = solve(vehicles, orders, config(1_000, 3)).unwrap();
    assert_eq!(report.unassigned.len(), 1);
    assert!(report.unassigned[0].reason.contains("capacity"));
    assert!(report.routes[0].load_kg <= 500.0);
}

#[test]
fn overweight_order_is_reported_against_the_fleet() {
    let vehicles = vec![vehicle("v1", 1_000.0)];
    let orders = vec![order("huge", 2_000.0, 3, "09:00", "16:00")];
    let report = solve(vehicles, orders, config(200, 3)).unwrap();
    assert_eq!(report.orders_assigned, 0);
    assert!(report.unassigned[0].reason.contains("fleet capacity"));
}

#[test]
fn unreachable_window_leaves_the_route_empty() {
    let vehicles = vec![vehicle("v1", 1_000.0)];
    // The stop is a few minutes' drive away; the window shuts first.
    let orders = vec![order("late", 100.0, 2, "08:00", "08:01")];
    let report = solve(vehicles, orders, config(500, 3)).unwrap();
    assert!(report.routes[0].stops.is_empty());
    assert!(report.unassigned[0].reason.contains("time window"));
}

#[test]
fn malformed_input_fails_fast() {
    let vehicles = vec![vehicle("v1", -5.0)];
    let err = solve(vehicles, vec![], config(100, 3));
    assert!(matches!(err, Err(InputError::NonPositiveCapacity { .. })));
}
