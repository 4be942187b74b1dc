//! Solvilo Application Orchestration Layer
//!
//! This crate contains the case wizard, upload tracking, autosave and the
//! message / notification feeds. It depends on `sv-core` ports only.

pub mod usecases;

pub use usecases::{
    AddFilesReport, AutosaveController, CaseWizard, Debouncer, DraftWorkspace, FeedError,
    FeedState, MessageFeed, NotificationFeed, UploadTracker, WizardCommandError,
};
