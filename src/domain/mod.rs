pub mod solution;
pub mod types;

pub use solution::{Solution, UnassignedReason};
pub use types::{Coordinate, CostBreakdown, Order, Problem, Vehicle};
