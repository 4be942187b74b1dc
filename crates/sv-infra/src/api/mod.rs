//! HTTP adapters for the Solvilo backend.

mod client;
mod draft_store;
mod messages;
mod notifications;

pub use client::{ApiClient, ApiError};
pub use draft_store::HttpDraftStore;
pub use messages::HttpMessages;
pub use notifications::HttpNotifications;
