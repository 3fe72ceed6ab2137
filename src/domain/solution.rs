use std::fmt;

use serde::Serialize;

/// Why an order could not be routed. Rendered verbatim in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnassignedReason {
    /// Heavier than the largest vehicle; no insertion can ever work.
    ExceedsFleetCapacity,
    NoRemainingCapacity,
    NoTimeWindowFits,
    ExceedsWorkday,
}

impl fmt::Display for UnassignedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UnassignedReason::ExceedsFleetCapacity => "weight exceeds maximum fleet capacity",
            UnassignedReason::NoRemainingCapacity => "no remaining capacity",
            UnassignedReason::NoTimeWindowFits => "no time window fits",
            UnassignedReason::ExceedsWorkday => "exceeds maximum workday",
        };
        f.write_str(text)
    }
}

/// One assignment state: per-vehicle stop sequences plus the orders that
/// did not make it in, each tagged with a reason.
///
/// `routes` is index-aligned with `Problem::vehicles`; stops are indices
/// into `Problem::orders`. Every input order appears exactly once, either
/// in some route or in `unassigned`.
#[derive(Debug, Clone)]
pub struct Solution {
    pub routes: Vec<Vec<usize>>,
    pub unassigned: Vec<(usize, UnassignedReason)>,
    /// Cached objective value, maintained by the evaluators.
    pub cost: f64,
}

impl Solution {
    pub fn empty(num_vehicles: usize) -> Self {
        Solution {
            routes: vec![Vec::new(); num_vehicles],
            unassigned: Vec::new(),
            cost: 0.0,
        }
    }

    pub fn assigned_count(&self) -> usize {
        self.routes.iter().map(Vec::len).sum()
    }

    /// Order count accounted for, routed or not. Must equal the input size.
    pub fn accounted_count(&self) -> usize {
        self.assigned_count() + self.unassigned.len()
    }
}
