//! Debounced draft persistence.

mod controller;
mod debouncer;

pub use controller::AutosaveController;
pub use debouncer::Debouncer;
