//! In-memory services seeded with demo data.
//!
//! Each instance owns its own copy of the seed; nothing is shared between
//! instances.

mod messages;
mod notifications;

pub use messages::InMemoryMessages;
pub use notifications::InMemoryNotifications;
