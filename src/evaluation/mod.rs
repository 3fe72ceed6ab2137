pub mod cost;
pub mod simulate;

pub use cost::{route_cost, solution_cost, unassigned_penalty, violation_score};
pub use simulate::{simulate, RouteEval, StopTiming, Violation};
