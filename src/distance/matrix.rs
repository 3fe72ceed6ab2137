use tracing::debug;

use crate::distance::haversine::haversine_m;
use crate::domain::{Coordinate, Order, Vehicle};

/// Build the all-pairs distance matrix over depot and order nodes, in
/// metres. Node numbering matches `Problem`: depots first, then orders in
/// input order.
pub fn create_dm(vehicles: &[Vehicle], orders: &[Order]) -> Vec<Vec<f64>> {
    let nodes: Vec<Coordinate> = vehicles
        .iter()
        .map(|v| v.depot)
        .chain(orders.iter().map(|o| o.location))
        .collect();

    debug!(
        "Creating distance matrix over {} nodes ({} depots, {} orders)",
        nodes.len(),
        vehicles.len(),
        orders.len()
    );

    nodes
        .iter()
        .map(|&from| nodes.iter().map(|&to| haversine_m(from, to)).collect())
        .collect()
}
