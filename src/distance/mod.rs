pub mod haversine;
pub mod matrix;

pub use haversine::{haversine_m, travel_time_s};
pub use matrix::create_dm;
