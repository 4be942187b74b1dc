//! Case wizard orchestrator.
//!
//! This module coordinates the wizard state machine, the shared draft,
//! uploads, autosave and the submission side effects.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, info_span, warn, Instrument};

use sv_core::case::Narrative;
use sv_core::ports::{ClockPort, DraftStorePort, NavigatorPort, Notice, NoticePort};
use sv_core::wizard::{self, WizardAction, WizardEvent, WizardState, WizardStateMachine, WizardStep};
use sv_core::{CaseRole, DraftCase, FileCandidate, FileId, UploadKind};

use crate::usecases::autosave::AutosaveController;
use crate::usecases::uploads::{AddFilesReport, UploadTracker};
use crate::usecases::wizard::context::WizardContext;
use crate::usecases::workspace::DraftWorkspace;

/// Errors produced by wizard commands that mutate the draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardCommandError {
    #[error("role is locked for this draft")]
    RoleLocked,
    #[error("draft cannot be edited while it is being submitted")]
    NotEditable,
}

const SUBMIT_FAILED_TITLE: &str = "Echec de la soumission";
const SUBMIT_FAILED_FALLBACK: &str = "Une erreur est survenue";

/// Orchestrator that drives the wizard state and side effects.
pub struct CaseWizard {
    context: Arc<WizardContext>,
    workspace: Arc<DraftWorkspace>,
    autosave: Arc<AutosaveController>,
    uploads: UploadTracker,
    store: Arc<dyn DraftStorePort>,
    notice: Arc<dyn NoticePort>,
    navigator: Arc<dyn NavigatorPort>,
}

impl CaseWizard {
    pub fn new(
        store: Arc<dyn DraftStorePort>,
        notice: Arc<dyn NoticePort>,
        navigator: Arc<dyn NavigatorPort>,
        clock: Arc<dyn ClockPort>,
        autosave_delay: Duration,
    ) -> Self {
        let workspace = Arc::new(DraftWorkspace::default());
        let autosave = Arc::new(AutosaveController::new(
            workspace.clone(),
            store.clone(),
            notice.clone(),
            clock,
            autosave_delay,
        ));
        let uploads = UploadTracker::new(
            workspace.clone(),
            store.clone(),
            notice.clone(),
            autosave.clone(),
        );
        Self {
            context: WizardContext::default().arc(),
            workspace,
            autosave,
            uploads,
            store,
            notice,
            navigator,
        }
    }

    /// Load the stored draft, if any. The stored copy replaces the in-memory one.
    pub async fn hydrate(&self) -> bool {
        match self.autosave.hydrate().await {
            Some(draft) => {
                if draft.role.is_some() {
                    self.context.set_role_locked(true);
                }
                true
            }
            None => false,
        }
    }

    pub async fn select_role(&self, role: CaseRole) -> Result<(), WizardCommandError> {
        self.ensure_editable().await?;
        let current = self.workspace.update(|draft| draft.role).await;
        if current == Some(role) {
            return Ok(());
        }
        if self.context.is_role_locked() {
            warn!(?current, requested = ?role, "role change refused");
            return Err(WizardCommandError::RoleLocked);
        }
        self.workspace.update(|draft| draft.role = Some(role)).await;
        debug!(role = role.code(), "role selected");
        self.autosave.schedule().await;
        Ok(())
    }

    /// Store the editor content; returns the plain-text length used by the gate.
    pub async fn update_narrative(&self, html: &str) -> Result<usize, WizardCommandError> {
        self.ensure_editable().await?;
        let narrative = Narrative::from_html(html);
        let len = self
            .workspace
            .update(|draft| {
                draft.set_narrative(narrative);
                draft.narrative_len()
            })
            .await;
        self.autosave.schedule().await;
        Ok(len)
    }

    pub async fn set_accepted(&self, accepted: bool) -> Result<(), WizardCommandError> {
        self.ensure_editable().await?;
        let changed = self
            .workspace
            .update(|draft| std::mem::replace(&mut draft.accepted, accepted) != accepted)
            .await;
        if changed {
            self.autosave.schedule().await;
        }
        Ok(())
    }

    pub async fn add_files(
        &self,
        kind: UploadKind,
        candidates: Vec<FileCandidate>,
    ) -> Result<AddFilesReport, WizardCommandError> {
        self.ensure_editable().await?;
        Ok(self.uploads.add_files(kind, candidates).await)
    }

    pub async fn remove_file(&self, kind: UploadKind, id: &FileId) -> Result<bool, WizardCommandError> {
        self.ensure_editable().await?;
        Ok(self.uploads.remove_file(kind, id).await)
    }

    pub async fn next(&self) -> WizardState {
        self.dispatch(WizardEvent::Next).await
    }

    pub async fn back(&self) -> WizardState {
        self.dispatch(WizardEvent::Back).await
    }

    pub async fn save_draft(&self) -> WizardState {
        self.dispatch(WizardEvent::SaveDraft).await
    }

    pub async fn request_submit(&self) -> WizardState {
        self.dispatch(WizardEvent::RequestSubmit).await
    }

    pub async fn cancel_submit(&self) -> WizardState {
        self.dispatch(WizardEvent::CancelSubmit).await
    }

    pub async fn confirm_submit(&self) -> WizardState {
        self.dispatch(WizardEvent::ConfirmSubmit).await
    }

    /// Discard the draft content and go back to the first step.
    pub async fn restart(&self) -> WizardState {
        self.dispatch(WizardEvent::Restart).await
    }

    /// Gate of the step currently shown.
    pub async fn can_proceed(&self) -> bool {
        let step = self.context.get_state().await.step();
        let draft = self.workspace.snapshot().await;
        wizard::can_proceed(step, &draft)
    }

    pub async fn state(&self) -> WizardState {
        self.context.get_state().await
    }

    pub async fn draft(&self) -> DraftCase {
        self.workspace.snapshot().await
    }

    pub async fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.workspace.last_saved_at().await
    }

    pub fn is_saving(&self) -> bool {
        self.workspace.is_saving()
    }

    pub async fn has_uploads_in_flight(&self) -> bool {
        self.uploads.has_uploads_in_flight().await
    }

    pub fn is_role_locked(&self) -> bool {
        self.context.is_role_locked()
    }

    /// Wait for running uploads, then for the autosave they triggered.
    pub async fn settle(&self) {
        self.uploads.settle().await;
        self.autosave.settle().await;
    }

    async fn ensure_editable(&self) -> Result<(), WizardCommandError> {
        match self.context.get_state().await {
            WizardState::Editing { .. } => Ok(()),
            _ => Err(WizardCommandError::NotEditable),
        }
    }

    async fn dispatch(&self, event: WizardEvent) -> WizardState {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;

        let span = info_span!("usecase.case_wizard.dispatch", event = ?event);
        async {
            let mut current = self.context.get_state().await;
            let mut pending_events = vec![event];

            while let Some(event) = pending_events.pop() {
                let from = current.clone();
                let event_name = format!("{:?}", event);
                let draft = self.workspace.snapshot().await;
                let (next, actions) = WizardStateMachine::transition(current, event, &draft);
                info!(from = ?from, to = ?next, event = %event_name, "wizard state transition");

                if next.step() != WizardStep::Role {
                    self.context.set_role_locked(true);
                }
                // Observers see `Submitting` while the submit calls run.
                self.context.set_state(next.clone()).await;
                let follow_up_events = self.execute_actions(actions).await;
                current = next;
                pending_events.extend(follow_up_events);
            }

            current
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(&self, actions: Vec<WizardAction>) -> Vec<WizardEvent> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            debug!(?action, "wizard executing action");
            match action {
                WizardAction::PersistNow => {
                    // Failures are already reported to the user by autosave.
                    let _ = self.autosave.flush().await;
                }
                WizardAction::SaveAndSubmit => {
                    follow_up_events.push(self.save_and_submit().await);
                }
                WizardAction::LeaveWizard => {
                    self.navigator.leave_wizard().await;
                }
                WizardAction::ResetDraft => {
                    self.autosave.cancel().await;
                    self.workspace
                        .update(|draft| {
                            *draft = DraftCase {
                                id: draft.id.clone(),
                                ..DraftCase::default()
                            }
                        })
                        .await;
                    self.context.set_role_locked(false);
                    self.autosave.schedule().await;
                }
            }
        }
        follow_up_events
    }

    async fn save_and_submit(&self) -> WizardEvent {
        self.autosave.cancel().await;
        let outcome = match self.autosave.save_now().await {
            Ok(saved) => self.store.submit_draft(&saved.id).await.map(|_| saved.id),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(id) => {
                info!(draft_id = %id, "draft submitted");
                self.notice
                    .notify(Notice::info(
                        "Dossier soumis",
                        "Votre dossier a ete cree avec succes. L'analyse va commencer.",
                    ))
                    .await;
                WizardEvent::SubmitSucceeded
            }
            Err(err) => {
                warn!(error = %err, "draft submission failed");
                let message = match err.to_string() {
                    message if message.is_empty() => SUBMIT_FAILED_FALLBACK.to_string(),
                    message => message,
                };
                self.notice
                    .notify(Notice::destructive(SUBMIT_FAILED_TITLE, message.clone()))
                    .await;
                WizardEvent::SubmitFailed { message }
            }
        }
    }
}
