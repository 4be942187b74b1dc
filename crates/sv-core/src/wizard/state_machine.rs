//! Wizard state machine.
//!
//! Defines a pure state transition function for the case submission wizard.

use crate::case::DraftCase;
use crate::wizard::gate::can_proceed;

/// Wizard step, in navigation order.
///
/// 向导步骤（按导航顺序）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Choose claimant or defendant.
    ///
    /// 选择申请人或被申请人。
    Role,
    /// Describe the facts.
    ///
    /// 填写事实陈述。
    Narrative,
    /// Attach contracts.
    ///
    /// 上传合同。
    Contracts,
    /// Attach evidence.
    ///
    /// 上传证据。
    Evidence,
    /// Review and consent.
    ///
    /// 复核与同意。
    Validation,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Role,
        WizardStep::Narrative,
        WizardStep::Contracts,
        WizardStep::Evidence,
        WizardStep::Validation,
    ];

    /// 1-based position shown to the user.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Role => 1,
            WizardStep::Narrative => 2,
            WizardStep::Contracts => 3,
            WizardStep::Evidence => 4,
            WizardStep::Validation => 5,
        }
    }

    pub fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Role => Some(WizardStep::Narrative),
            WizardStep::Narrative => Some(WizardStep::Contracts),
            WizardStep::Contracts => Some(WizardStep::Evidence),
            WizardStep::Evidence => Some(WizardStep::Validation),
            WizardStep::Validation => None,
        }
    }

    pub fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::Role => None,
            WizardStep::Narrative => Some(WizardStep::Role),
            WizardStep::Contracts => Some(WizardStep::Narrative),
            WizardStep::Evidence => Some(WizardStep::Contracts),
            WizardStep::Validation => Some(WizardStep::Evidence),
        }
    }
}

/// Wizard state.
///
/// 向导状态。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WizardState {
    /// Filling in a step.
    ///
    /// 正在填写某一步。
    Editing {
        step: WizardStep,
        error: Option<WizardError>,
    },
    /// Submission confirmation dialog is open.
    ///
    /// 提交确认对话框已打开。
    ConfirmSubmission,
    /// Save and submit calls are running.
    ///
    /// 正在保存并提交。
    Submitting,
    /// Case submitted.
    ///
    /// 案件已提交。
    Submitted,
}

impl Default for WizardState {
    fn default() -> Self {
        WizardState::Editing {
            step: WizardStep::Role,
            error: None,
        }
    }
}

impl WizardState {
    /// Step the user is looking at; submission states sit on the last step.
    pub fn step(&self) -> WizardStep {
        match self {
            WizardState::Editing { step, .. } => *step,
            _ => WizardStep::Validation,
        }
    }

    pub fn error(&self) -> Option<&WizardError> {
        match self {
            WizardState::Editing { error, .. } => error.as_ref(),
            _ => None,
        }
    }
}

/// Events that drive the wizard.
///
/// 驱动向导的事件。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WizardEvent {
    /// Go to the next step.
    ///
    /// 下一步。
    Next,
    /// Go to the previous step.
    ///
    /// 上一步。
    Back,
    /// Persist the draft now.
    ///
    /// 立即保存草稿。
    SaveDraft,
    /// Open the submission confirmation.
    ///
    /// 打开提交确认。
    RequestSubmit,
    /// Close the submission confirmation.
    ///
    /// 关闭提交确认。
    CancelSubmit,
    /// Confirm the submission.
    ///
    /// 确认提交。
    ConfirmSubmit,
    /// Save and submit both succeeded.
    ///
    /// 提交成功。
    SubmitSucceeded,
    /// Save or submit failed.
    ///
    /// 提交失败。
    SubmitFailed { message: String },
    /// Throw the draft away and start over.
    ///
    /// 放弃草稿并重新开始。
    Restart,
}

/// Side-effects produced by state transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WizardAction {
    /// Bypass the debounce and save now.
    ///
    /// 跳过防抖立即保存。
    PersistNow,
    /// Save the draft, then submit it.
    ///
    /// 保存草稿后提交。
    SaveAndSubmit,
    /// Navigate away from the wizard.
    ///
    /// 离开向导页面。
    LeaveWizard,
    /// Replace the draft with an empty one.
    ///
    /// 重置草稿。
    ResetDraft,
}

/// Wizard error types.
///
/// 向导错误类型。
#[derive(
    Debug, Clone, PartialEq, Eq, thiserror::Error, serde::Serialize, serde::Deserialize,
)]
pub enum WizardError {
    #[error("step {} is not complete", .step.number())]
    GateClosed { step: WizardStep },
    #[error("consent is required before submitting")]
    ConsentMissing,
    #[error("{message}")]
    SubmissionFailed { message: String },
}

/// Pure wizard state machine.
///
/// 纯状态机：不包含副作用。
pub struct WizardStateMachine;

impl WizardStateMachine {
    pub fn transition(
        state: WizardState,
        event: WizardEvent,
        draft: &DraftCase,
    ) -> (WizardState, Vec<WizardAction>) {
        match (state, event) {
            (WizardState::Submitting, WizardEvent::Restart) => {
                (WizardState::Submitting, Vec::new())
            }
            (_, WizardEvent::Restart) => (WizardState::default(), vec![WizardAction::ResetDraft]),
            (WizardState::Editing { step, .. }, WizardEvent::Next) => match step.next() {
                Some(next) if can_proceed(step, draft) => (editing(next), Vec::new()),
                Some(_) => (
                    WizardState::Editing {
                        step,
                        error: Some(WizardError::GateClosed { step }),
                    },
                    Vec::new(),
                ),
                None => (editing(step), Vec::new()),
            },
            (WizardState::Editing { step, error }, WizardEvent::Back) => match step.previous() {
                Some(previous) => (editing(previous), Vec::new()),
                None => (WizardState::Editing { step, error }, Vec::new()),
            },
            (WizardState::Editing { step: WizardStep::Validation, .. }, WizardEvent::SaveDraft) => {
                (editing(WizardStep::Validation), vec![WizardAction::PersistNow])
            }
            (
                WizardState::Editing { step: WizardStep::Validation, .. },
                WizardEvent::RequestSubmit,
            ) => match submission_blocker(draft) {
                None => (WizardState::ConfirmSubmission, Vec::new()),
                Some(error) => (
                    WizardState::Editing {
                        step: WizardStep::Validation,
                        error: Some(error),
                    },
                    Vec::new(),
                ),
            },
            (WizardState::ConfirmSubmission, WizardEvent::CancelSubmit) => {
                (editing(WizardStep::Validation), Vec::new())
            }
            (WizardState::ConfirmSubmission, WizardEvent::ConfirmSubmit) => {
                match submission_blocker(draft) {
                    None => (WizardState::Submitting, vec![WizardAction::SaveAndSubmit]),
                    Some(error) => (
                        WizardState::Editing {
                            step: WizardStep::Validation,
                            error: Some(error),
                        },
                        Vec::new(),
                    ),
                }
            }
            (WizardState::Submitting, WizardEvent::SubmitSucceeded) => {
                (WizardState::Submitted, vec![WizardAction::LeaveWizard])
            }
            (WizardState::Submitting, WizardEvent::SubmitFailed { message }) => (
                WizardState::Editing {
                    step: WizardStep::Validation,
                    error: Some(WizardError::SubmissionFailed { message }),
                },
                Vec::new(),
            ),
            (state, _event) => (state, Vec::new()),
        }
    }
}

fn editing(step: WizardStep) -> WizardState {
    WizardState::Editing { step, error: None }
}

/// Missing consent is reported ahead of the other step 5 conditions.
fn submission_blocker(draft: &DraftCase) -> Option<WizardError> {
    if !draft.accepted {
        return Some(WizardError::ConsentMissing);
    }
    if !can_proceed(WizardStep::Validation, draft) {
        return Some(WizardError::GateClosed {
            step: WizardStep::Validation,
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{WizardAction, WizardError, WizardEvent, WizardState, WizardStateMachine, WizardStep};
    use crate::case::{CaseRole, DraftCase, FileCandidate, UploadKind, UploadStatus, UploadedFile};

    fn at(step: WizardStep) -> WizardState {
        WizardState::Editing { step, error: None }
    }

    fn submittable() -> DraftCase {
        let mut contract =
            UploadedFile::uploading(&FileCandidate::new("bail.pdf", "x"), UploadKind::Contract);
        contract.status = UploadStatus::Uploaded;
        DraftCase {
            role: Some(CaseRole::Claimant),
            narrative: "x".repeat(120),
            contracts: vec![contract],
            accepted: true,
            ..DraftCase::default()
        }
    }

    #[test]
    fn wizard_state_machine_next_without_role_records_gate_error() {
        let (next, actions) =
            WizardStateMachine::transition(at(WizardStep::Role), WizardEvent::Next, &DraftCase::default());
        assert_eq!(
            next,
            WizardState::Editing {
                step: WizardStep::Role,
                error: Some(WizardError::GateClosed {
                    step: WizardStep::Role
                }),
            }
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn wizard_state_machine_next_with_open_gate_advances_and_clears_error() {
        let state = WizardState::Editing {
            step: WizardStep::Role,
            error: Some(WizardError::GateClosed {
                step: WizardStep::Role,
            }),
        };
        let (next, _) = WizardStateMachine::transition(state, WizardEvent::Next, &submittable());
        assert_eq!(next, at(WizardStep::Narrative));
    }

    #[test]
    fn wizard_state_machine_back_has_no_gate() {
        let (next, actions) = WizardStateMachine::transition(
            at(WizardStep::Evidence),
            WizardEvent::Back,
            &DraftCase::default(),
        );
        assert_eq!(next, at(WizardStep::Contracts));
        assert!(actions.is_empty());
    }

    #[test]
    fn wizard_state_machine_back_on_first_step_is_noop() {
        let (next, _) =
            WizardStateMachine::transition(at(WizardStep::Role), WizardEvent::Back, &DraftCase::default());
        assert_eq!(next, at(WizardStep::Role));
    }

    #[test]
    fn wizard_state_machine_save_draft_on_last_step_persists_now() {
        let (next, actions) = WizardStateMachine::transition(
            at(WizardStep::Validation),
            WizardEvent::SaveDraft,
            &DraftCase::default(),
        );
        assert_eq!(next, at(WizardStep::Validation));
        assert_eq!(actions, vec![WizardAction::PersistNow]);
    }

    #[test]
    fn wizard_state_machine_request_submit_without_consent_is_refused() {
        let mut draft = submittable();
        draft.accepted = false;
        let (next, _) = WizardStateMachine::transition(
            at(WizardStep::Validation),
            WizardEvent::RequestSubmit,
            &draft,
        );
        assert_eq!(next.error(), Some(&WizardError::ConsentMissing));
    }

    #[test]
    fn wizard_state_machine_confirm_submit_rechecks_consent() {
        let mut draft = submittable();
        draft.accepted = false;
        let (next, actions) = WizardStateMachine::transition(
            WizardState::ConfirmSubmission,
            WizardEvent::ConfirmSubmit,
            &draft,
        );
        assert_eq!(next.error(), Some(&WizardError::ConsentMissing));
        assert!(actions.is_empty());
    }

    #[test]
    fn wizard_state_machine_full_submission_flow() {
        let draft = submittable();
        let (state, _) = WizardStateMachine::transition(
            at(WizardStep::Validation),
            WizardEvent::RequestSubmit,
            &draft,
        );
        assert_eq!(state, WizardState::ConfirmSubmission);

        let (state, actions) =
            WizardStateMachine::transition(state, WizardEvent::ConfirmSubmit, &draft);
        assert_eq!(state, WizardState::Submitting);
        assert_eq!(actions, vec![WizardAction::SaveAndSubmit]);

        let (state, actions) =
            WizardStateMachine::transition(state, WizardEvent::SubmitSucceeded, &draft);
        assert_eq!(state, WizardState::Submitted);
        assert_eq!(actions, vec![WizardAction::LeaveWizard]);
    }

    #[test]
    fn wizard_state_machine_submit_failure_returns_to_last_step_with_message() {
        let (state, _) = WizardStateMachine::transition(
            WizardState::Submitting,
            WizardEvent::SubmitFailed {
                message: "API error 500".into(),
            },
            &submittable(),
        );
        assert_eq!(state.step(), WizardStep::Validation);
        assert_eq!(
            state.error().map(ToString::to_string).as_deref(),
            Some("API error 500")
        );
    }

    #[test]
    fn wizard_state_machine_cancel_submit_closes_confirmation() {
        let (state, _) = WizardStateMachine::transition(
            WizardState::ConfirmSubmission,
            WizardEvent::CancelSubmit,
            &submittable(),
        );
        assert_eq!(state, at(WizardStep::Validation));
    }

    #[test]
    fn wizard_state_machine_restart_resets_unless_submitting() {
        let (state, actions) = WizardStateMachine::transition(
            at(WizardStep::Evidence),
            WizardEvent::Restart,
            &submittable(),
        );
        assert_eq!(state, at(WizardStep::Role));
        assert_eq!(actions, vec![WizardAction::ResetDraft]);

        let (state, actions) =
            WizardStateMachine::transition(WizardState::Submitting, WizardEvent::Restart, &submittable());
        assert_eq!(state, WizardState::Submitting);
        assert!(actions.is_empty());
    }

    #[test]
    fn wizard_state_machine_ignores_unrelated_events() {
        let (state, actions) = WizardStateMachine::transition(
            at(WizardStep::Narrative),
            WizardEvent::ConfirmSubmit,
            &submittable(),
        );
        assert_eq!(state, at(WizardStep::Narrative));
        assert!(actions.is_empty());
    }
}
