use chrono::NaiveTime;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::domain::{Coordinate, Order, Vehicle};

/// Demo scenarios are spread around the Mexico City Zócalo.
const CENTER: Coordinate = Coordinate {
    lat: 19.4326,
    lon: -99.1332,
};

const CAPACITY_PALETTE: [f64; 3] = [1_200.0, 800.0, 500.0];

/// Generate a reproducible random fleet and order list for the demo binary
/// and benchmarks. Same seed, same scenario.
pub fn generate_scenario(
    num_vehicles: usize,
    num_orders: usize,
    seed: u64,
) -> (Vec<Vehicle>, Vec<Order>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let vehicles: Vec<Vehicle> = (0..num_vehicles)
        .map(|i| Vehicle {
            id: format!("veh-{i:02}"),
            capacity_kg: CAPACITY_PALETTE[i % CAPACITY_PALETTE.len()],
            depot: Coordinate::new(
                CENTER.lat + rng.gen_range(-0.02..0.02),
                CENTER.lon + rng.gen_range(-0.02..0.02),
            ),
            shift_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
        })
        .collect();

    let orders: Vec<Order> = (0..num_orders)
        .map(|i| {
            // Windows open between 08:30 and 14:00 and stay open 1.5–4 h,
            // all inside an 8 h shift from 08:00.
            let start_min: u32 = rng.gen_range(510..840);
            let length_min: u32 = rng.gen_range(90..240);
            let end_min = start_min + length_min;
            Order {
                id: format!("ord-{i:03}"),
                location: Coordinate::new(
                    CENTER.lat + rng.gen_range(-0.12..0.12),
                    CENTER.lon + rng.gen_range(-0.12..0.12),
                ),
                weight_kg: rng.gen_range(20.0..250.0),
                priority: rng.gen_range(1..=5),
                window_start: NaiveTime::from_hms_opt(start_min / 60, start_min % 60, 0)
                    .unwrap_or_default(),
                window_end: NaiveTime::from_hms_opt(end_min / 60, end_min % 60, 0)
                    .unwrap_or_default(),
                service_s: rng.gen_range(300.0..900.0),
            }
        })
        .collect();

    info!(
        "Generated scenario: {} vehicles, {} orders (seed {})",
        num_vehicles, num_orders, seed
    );

    (vehicles, orders)
}
