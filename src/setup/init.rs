use std::collections::HashSet;

use thiserror::Error;
use tracing::info;

use crate::config::SolverConfig;
use crate::distance::create_dm;
use crate::domain::{Coordinate, Order, Problem, Vehicle};

/// Malformed input records. Surfaced before any solving begins; a solve
/// never starts on bad data.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("fleet is empty")]
    EmptyFleet,
    #[error("{kind} id must not be empty")]
    EmptyId { kind: &'static str },
    #[error("duplicate {kind} id `{id}`")]
    DuplicateId { kind: &'static str, id: String },
    #[error("{kind} `{id}`: coordinate out of range ({lat}, {lon})")]
    BadCoordinate {
        kind: &'static str,
        id: String,
        lat: f64,
        lon: f64,
    },
    #[error("vehicle `{id}`: capacity must be positive, got {capacity}")]
    NonPositiveCapacity { id: String, capacity: f64 },
    #[error("order `{id}`: weight must be positive, got {weight}")]
    NonPositiveWeight { id: String, weight: f64 },
    #[error("order `{id}`: priority must be positive")]
    ZeroPriority { id: String },
    #[error("order `{id}`: time window ends before it starts")]
    InvertedWindow { id: String },
    #[error("order `{id}`: service duration must not be negative")]
    NegativeService { id: String },
}

fn check_coordinate(
    kind: &'static str,
    id: &str,
    c: Coordinate,
) -> Result<(), InputError> {
    let lat_ok = c.lat.is_finite() && (-90.0..=90.0).contains(&c.lat);
    let lon_ok = c.lon.is_finite() && (-180.0..=180.0).contains(&c.lon);
    if lat_ok && lon_ok {
        Ok(())
    } else {
        Err(InputError::BadCoordinate {
            kind,
            id: id.to_string(),
            lat: c.lat,
            lon: c.lon,
        })
    }
}

fn check_ids<'a, I: Iterator<Item = &'a str>>(
    kind: &'static str,
    ids: I,
) -> Result<(), InputError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.is_empty() {
            return Err(InputError::EmptyId { kind });
        }
        if !seen.insert(id) {
            return Err(InputError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

/// Validate the raw records and assemble the read-only `Problem`,
/// including the precomputed travel matrix.
pub fn build_problem(
    vehicles: Vec<Vehicle>,
    orders: Vec<Order>,
    config: SolverConfig,
) -> Result<Problem, InputError> {
    if vehicles.is_empty() {
        return Err(InputError::EmptyFleet);
    }
    check_ids("vehicle", vehicles.iter().map(|v| v.id.as_str()))?;
    check_ids("order", orders.iter().map(|o| o.id.as_str()))?;

    for v in &vehicles {
        check_coordinate("vehicle", &v.id, v.depot)?;
        if !(v.capacity_kg > 0.0) {
            return Err(InputError::NonPositiveCapacity {
                id: v.id.clone(),
                capacity: v.capacity_kg,
            });
        }
    }

    for o in &orders {
        check_coordinate("order", &o.id, o.location)?;
        if !(o.weight_kg > 0.0) {
            return Err(InputError::NonPositiveWeight {
                id: o.id.clone(),
                weight: o.weight_kg,
            });
        }
        if o.priority == 0 {
            return Err(InputError::ZeroPriority { id: o.id.clone() });
        }
        if o.window_end < o.window_start {
            return Err(InputError::InvertedWindow { id: o.id.clone() });
        }
        if o.service_s < 0.0 {
            return Err(InputError::NegativeService { id: o.id.clone() });
        }
    }

    info!(
        "Validated {} vehicles and {} orders",
        vehicles.len(),
        orders.len()
    );

    let travel_matrix = create_dm(&vehicles, &orders);

    Ok(Problem {
        vehicles,
        orders,
        travel_matrix,
        config,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;

    fn vehicle(id: &str, capacity: f64) -> Vehicle {
        Vehicle {
            id: id.into(),
            capacity_kg: capacity,
            depot: Coordinate::new(19.43, -99.13),
            shift_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        }
    }

    fn order(id: &str, weight: f64) -> Order {
        Order {
            id: id.into(),
            location: Coordinate::new(19.45, -99.12),
            weight_kg: weight,
            priority: 1,
            window_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            window_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            service_s: 0.0,
        }
    }

    #[test]
    fn rejects_empty_fleet() {
        let err = build_problem(vec![], vec![order("o1", 10.0)], Default::default());
        assert!(matches!(err, Err(InputError::EmptyFleet)));
    }

    #[test]
    fn rejects_non_positive_capacity() {
        let err = build_problem(
            vec![vehicle("v1", 0.0)],
            vec![],
            Default::default(),
        );
        assert!(matches!(
            err,
            Err(InputError::NonPositiveCapacity { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let mut v = vehicle("v1", 100.0);
        v.depot = Coordinate::new(120.0, -99.13);
        let err = build_problem(vec![v], vec![], Default::default());
        assert!(matches!(err, Err(InputError::BadCoordinate { .. })));
    }

    #[test]
    fn rejects_duplicate_order_ids() {
        let err = build_problem(
            vec![vehicle("v1", 100.0)],
            vec![order("o1", 10.0), order("o1", 20.0)],
            Default::default(),
        );
        assert!(matches!(err, Err(InputError::DuplicateId { .. })));
    }

    #[test]
    fn rejects_inverted_window() {
        let mut o = order("o1", 10.0);
        o.window_end = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        let err = build_problem(vec![vehicle("v1", 100.0)], vec![o], Default::default());
        assert!(matches!(err, Err(InputError::InvertedWindow { .. })));
    }

    #[test]
    fn builds_matrix_over_depots_and_orders() {
        let problem = build_problem(
            vec![vehicle("v1", 100.0)],
            vec![order("o1", 10.0), order("o2", 20.0)],
            Default::default(),
        )
        .unwrap();
        assert_eq!(problem.travel_matrix.len(), 3);
        assert_eq!(problem.order_node(0), 1);
    }
}
