//! Capacitated vehicle routing with time windows.
//!
//! The engine assigns delivery orders to a capacity- and window-constrained
//! fleet: a greedy best-insertion constructor builds an initial feasible
//! solution, then simulated annealing refines it under a geometric cooling
//! schedule. Orders that cannot be served are returned with a specific
//! reason, weighted quadratically by priority so the optimizer sacrifices
//! distance before dropping critical deliveries.
//!
//! A solve is a pure function of (vehicles, orders, config, seed): same
//! inputs, same solution, bit for bit.

pub mod config;
pub mod distance;
pub mod domain;
pub mod evaluation;
pub mod fixtures;
pub mod setup;
pub mod solver;

pub use config::SolverConfig;
pub use domain::{Coordinate, CostBreakdown, Order, Problem, Solution, UnassignedReason, Vehicle};
pub use setup::{build_problem, InputError};
pub use solver::{assemble, construct, optimize, solve, Annealer, SolutionReport};
