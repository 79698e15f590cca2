//! Command implementations.

pub mod compare;
pub mod config;

pub use self::compare::{execute_compare, run_compare, CompareReport};
pub use self::config::execute_config;
