pub mod data_generator;

pub use data_generator::generate_scenario;

#[cfg(test)]
pub(crate) use test_support::test_problem;
