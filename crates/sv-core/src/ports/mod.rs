//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. The wizard, autosave and feeds only
//! ever talk to storage, the backend and the UI shell through these traits.
//!
//! ## Port Placement Guidelines
//!
//! A port belongs here when it is implemented by `sv-infra` or by the host
//! and is used by more than one use case. Helper traits that only one use
//! case needs stay next to that use case in `sv-app`.

mod clock;
pub mod draft_store;
pub mod errors;
pub mod messages;
pub mod navigator;
pub mod notice;
pub mod notifications;

pub use clock::*;
pub use draft_store::DraftStorePort;
pub use errors::{DraftStoreError, ServiceError};
pub use messages::MessagesPort;
pub use navigator::NavigatorPort;
pub use notice::{Notice, NoticeLevel, NoticePort};
pub use notifications::NotificationsPort;
