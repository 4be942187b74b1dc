pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, resolve_config, ResolvedConfig};
pub use wiring::{wire_dependencies, AppServices};
