pub mod annealing;
pub mod assemble;
pub mod greedy;

pub use annealing::{optimize, Annealer, Move};
pub use assemble::{assemble, RouteReport, SolutionReport, StopReport, UnassignedReport};
pub use greedy::construct;

use crate::config::SolverConfig;
use crate::domain::{Order, Vehicle};
use crate::setup::{build_problem, InputError};

/// Validate the inputs, construct greedily, refine by annealing, and shape
/// the final report. One synchronous call per solve; concurrent solves
/// share nothing.
pub fn solve(
    vehicles: Vec<Vehicle>,
    orders: Vec<Order>,
    config: SolverConfig,
) -> Result<SolutionReport, InputError> {
    let problem = build_problem(vehicles, orders, config)?;
    let initial = construct(&problem);
    let best = optimize(&problem, initial);
    Ok(assemble(&problem, &best))
}
