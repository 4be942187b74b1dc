//! Per-step gates controlling forward navigation.

use crate::case::DraftCase;
use crate::case::NARRATIVE_MIN_CHARS;
use crate::case::UploadKind;
use crate::wizard::WizardStep;

/// Whether the wizard may leave `step` going forward (or submit, on the last step).
pub fn can_proceed(step: WizardStep, draft: &DraftCase) -> bool {
    match step {
        WizardStep::Role => draft.role.is_some(),
        WizardStep::Narrative => draft.narrative_len() >= NARRATIVE_MIN_CHARS,
        WizardStep::Contracts => {
            !draft.contracts.is_empty()
                && !draft.has_uploads_in_flight()
                && !draft.has_failed_uploads(UploadKind::Contract)
        }
        WizardStep::Evidence => !draft.has_uploads_in_flight(),
        WizardStep::Validation => {
            draft.accepted
                && !draft.contracts.is_empty()
                && !draft.has_uploads_in_flight()
                && draft.all_contracts_uploaded()
                && !draft.has_failed_uploads(UploadKind::Evidence)
        }
    }
}
