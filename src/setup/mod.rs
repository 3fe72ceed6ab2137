pub mod init;

pub use init::{build_problem, InputError};
