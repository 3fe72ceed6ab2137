use serde::{Deserialize, Serialize};

pub mod constant {
    pub(crate) const EARTH_RADIUS_M: f64 = 6_371_000.0;
    pub(crate) const SECS_PER_HOUR: f64 = 3_600.0;
    pub(crate) const SECS_PER_MIN: f64 = 60.0;
}

/// Weights, cooling schedule, and physical assumptions for one solve.
///
/// Always passed by value into the engine; the solver never reads ambient
/// state, so concurrent solves with distinct configs cannot interfere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Soft cost per kilometre driven.
    pub w_dist: f64,
    /// Soft cost per minute spent waiting for a window to open.
    pub w_wait: f64,
    /// Per-minute weight on lateness, used only to rank infeasible
    /// candidates when picking a rejection reason.
    pub w_late: f64,
    /// Per-minute weight on workday overrun, same role as `w_late`.
    pub w_overtime: f64,
    /// Weight on squared unused-capacity fraction per non-empty route.
    pub w_capacity_waste: f64,
    /// Multiplier on priority² for every order left unassigned.
    pub w_unassigned: f64,
    pub initial_temperature: f64,
    pub cooling_rate: f64,
    pub max_iterations: usize,
    pub random_seed: u64,
    pub max_workday_hours: f64,
    pub average_speed_kmh: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            w_dist: 1.0,
            w_wait: 0.2,
            w_late: 1.0,
            w_overtime: 1.0,
            w_capacity_waste: 5.0,
            w_unassigned: 100.0,
            initial_temperature: 1_000.0,
            cooling_rate: 0.995,
            max_iterations: 10_000,
            random_seed: 42,
            max_workday_hours: 8.0,
            average_speed_kmh: 30.0,
        }
    }
}

impl SolverConfig {
    pub fn max_workday_s(&self) -> f64 {
        self.max_workday_hours * constant::SECS_PER_HOUR
    }
}
