use crate::config::constant::EARTH_RADIUS_M;
use crate::domain::Coordinate;

/// Great-circle distance in metres between two coordinates.
pub fn haversine_m(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lon - a.lon).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Travel time in seconds at a fixed average speed. This is a deliberate
/// simplification, not a traffic model.
pub fn travel_time_s(distance_m: f64, average_speed_kmh: f64) -> f64 {
    distance_m / (average_speed_kmh / 3.6)
}
