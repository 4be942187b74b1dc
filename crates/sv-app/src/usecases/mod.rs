//! Business logic use cases
//!
//! ```text
//! CaseWizard ──► UploadTracker ──► DraftStorePort::upload_file
//!     │               │
//!     └───────► AutosaveController ──► DraftStorePort::save_draft
//!                     ▲
//!               DraftWorkspace (shared form state)
//!
//! MessageFeed / NotificationFeed ──► MessagesPort / NotificationsPort
//! ```

pub mod autosave;
pub mod feeds;
pub mod uploads;
pub mod wizard;
pub mod workspace;

pub use autosave::{AutosaveController, Debouncer};
pub use feeds::{FeedError, FeedState, MessageFeed, NotificationFeed};
pub use uploads::{AddFilesReport, UploadTracker};
pub use wizard::{CaseWizard, WizardCommandError};
pub use workspace::DraftWorkspace;
