pub mod neighborhood;
pub mod search;

pub use neighborhood::Move;
pub use search::{optimize, Annealer};
