//! Case submission wizard domain module.
//!
//! This module defines the five-step wizard state machine and its step gates.

pub mod gate;
pub mod state_machine;

pub use gate::can_proceed;
pub use state_machine::{
    WizardAction, WizardError, WizardEvent, WizardState, WizardStateMachine, WizardStep,
};
