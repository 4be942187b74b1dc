//! Solvilo host: configuration, logging and dependency wiring around the
//! case-filing core in `sv-app`.

pub mod adapters;
pub mod bootstrap;
pub mod utils;
