//! Async data feeds: fetch on mount, optimistic read-state mutations.
//!
//! Local read flags are a non-authoritative cache. A mark-as-read call is
//! applied locally first and then confirmed with the backend; a failed
//! confirmation is logged and swallowed, and the next fetch reconciles.

mod messages;
mod notifications;
mod state;

pub use messages::{FeedError, MessageFeed};
pub use notifications::NotificationFeed;
pub use state::FeedState;
