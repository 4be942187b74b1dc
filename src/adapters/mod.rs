//! Host-side implementations of the UI-facing ports.
//!
//! Without a UI shell, notices and navigation requests are written to the log.

mod navigator;
mod notice;

pub use navigator::LoggingNavigator;
pub use notice::LoggingNotice;
