pub mod api;
pub mod demo;
pub mod draft_store;
pub mod time;

pub use api::{ApiClient, HttpDraftStore, HttpMessages, HttpNotifications};
pub use demo::{InMemoryMessages, InMemoryNotifications};
pub use draft_store::{FileDraftStore, SimulatedLatency};
pub use time::SystemClock;
