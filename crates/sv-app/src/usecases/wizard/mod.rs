//! Case submission wizard use cases.

mod context;
mod orchestrator;

pub use context::WizardContext;
pub use orchestrator::{CaseWizard, WizardCommandError};
