use chrono::NaiveTime;
use chrono::Timelike;
use serde::Serialize;

use crate::config::SolverConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Coordinate { lat, lon }
    }
}

/// A delivery vehicle. Immutable for the duration of a solve.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: String,
    pub capacity_kg: f64,
    pub depot: Coordinate,
    pub shift_start: NaiveTime,
}

/// A delivery order. Immutable input; routes reference orders by index.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: String,
    pub location: Coordinate,
    pub weight_kg: f64,
    /// Positive, higher = more critical. Losing an order costs priority².
    pub priority: u32,
    pub window_start: NaiveTime,
    pub window_end: NaiveTime,
    /// On-site handling time in seconds, zero if none.
    pub service_s: f64,
}

impl Order {
    pub fn window_start_s(&self) -> f64 {
        self.window_start.num_seconds_from_midnight() as f64
    }

    pub fn window_end_s(&self) -> f64 {
        self.window_end.num_seconds_from_midnight() as f64
    }
}

/// One solve's read-only world: fleet, orders, precomputed travel matrix,
/// and the configuration the whole solve runs under.
///
/// Matrix node numbering: vehicle depots occupy `0..vehicles.len()`, order
/// locations follow in input order.
#[derive(Debug, Clone)]
pub struct Problem {
    pub vehicles: Vec<Vehicle>,
    pub orders: Vec<Order>,
    pub travel_matrix: Vec<Vec<f64>>,
    pub config: SolverConfig,
}

impl Problem {
    pub fn depot_node(&self, vehicle: usize) -> usize {
        vehicle
    }

    pub fn order_node(&self, order: usize) -> usize {
        self.vehicles.len() + order
    }

    /// Metres between two matrix nodes.
    pub fn leg_m(&self, from_node: usize, to_node: usize) -> f64 {
        self.travel_matrix[from_node][to_node]
    }

    pub fn fleet_max_capacity(&self) -> f64 {
        self.vehicles
            .iter()
            .map(|v| v.capacity_kg)
            .fold(0.0, f64::max)
    }
}

/// Decomposed objective contributions, kept separate for diagnostics.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CostBreakdown {
    pub distance_m: f64,
    pub wait_s: f64,
    pub lateness_s: f64,
    pub overtime_s: f64,
    pub capacity_waste: f64,
    pub unassigned_penalty: f64,
    pub total: f64,
}

impl CostBreakdown {
    pub fn accumulate(&mut self, other: &CostBreakdown) {
        self.distance_m += other.distance_m;
        self.wait_s += other.wait_s;
        self.lateness_s += other.lateness_s;
        self.overtime_s += other.overtime_s;
        self.capacity_waste += other.capacity_waste;
        self.unassigned_penalty += other.unassigned_penalty;
        self.total += other.total;
    }
}
