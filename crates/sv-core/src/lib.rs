//! # sv-core
//!
//! Core domain models and business rules for the Solvilo case-filing client.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod case;
pub mod config;
pub mod ids;
pub mod messages;
pub mod notifications;
pub mod ports;
pub mod read_state;
pub mod wizard;

// Re-export commonly used types at the crate root
pub use case::{
    CaseRole, DraftCase, FileCandidate, FileRules, FileViolation, SaveDraftPayload, UploadKind,
    UploadStatus, UploadedFile,
};
pub use config::AppConfig;
pub use ids::{CaseId, DraftId, FileId, MessageId, NotificationId, UserId};
pub use messages::CaseMessage;
pub use notifications::AppNotification;
pub use read_state::ReadState;
pub use wizard::{WizardAction, WizardError, WizardEvent, WizardState, WizardStateMachine, WizardStep};
