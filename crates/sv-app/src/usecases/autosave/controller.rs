use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info, info_span, warn, Instrument};

use sv_core::ports::{ClockPort, DraftStoreError, DraftStorePort, Notice, NoticePort};
use sv_core::DraftCase;

use super::Debouncer;
use crate::usecases::workspace::DraftWorkspace;

/// Default quiet period before a change is persisted.
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(800);

const SAVE_FAILED_TITLE: &str = "Sauvegarde brouillon echouee";
const SAVE_FAILED_FALLBACK: &str = "Veuillez reessayer";

/// Persists the workspace draft after a quiet period, or immediately on demand.
pub struct AutosaveController {
    workspace: Arc<DraftWorkspace>,
    store: Arc<dyn DraftStorePort>,
    notice: Arc<dyn NoticePort>,
    clock: Arc<dyn ClockPort>,
    debouncer: Debouncer,
    /// One save at a time, so an older snapshot never lands after a newer one.
    save_lock: Mutex<()>,
}

impl AutosaveController {
    pub fn new(
        workspace: Arc<DraftWorkspace>,
        store: Arc<dyn DraftStorePort>,
        notice: Arc<dyn NoticePort>,
        clock: Arc<dyn ClockPort>,
        delay: Duration,
    ) -> Self {
        Self {
            workspace,
            store,
            notice,
            clock,
            debouncer: Debouncer::new(delay),
            save_lock: Mutex::new(()),
        }
    }

    /// Read the stored draft into the workspace. Does not schedule a save.
    ///
    /// An absent draft and a failed read both leave the workspace untouched.
    pub async fn hydrate(&self) -> Option<DraftCase> {
        match self.store.get_draft().await {
            Ok(Some(stored)) => {
                let draft = stored.hydrated();
                info!(draft_id = %draft.id, "draft hydrated");
                self.workspace.replace(draft.clone()).await;
                Some(draft)
            }
            Ok(None) => {
                debug!("no stored draft");
                None
            }
            Err(err) => {
                warn!(error = %err, "draft hydration failed");
                None
            }
        }
    }

    /// Restart the quiet period; the save reads the workspace when it fires.
    pub async fn schedule(self: &Arc<Self>) {
        let this = Arc::clone(self);
        self.debouncer
            .schedule(move || async move {
                let _ = this.persist().await;
            })
            .await;
    }

    pub async fn cancel(&self) -> bool {
        self.debouncer.cancel().await
    }

    pub async fn is_pending(&self) -> bool {
        self.debouncer.is_pending().await
    }

    /// Skip the quiet period and save now.
    pub async fn flush(&self) -> Result<DraftCase, DraftStoreError> {
        self.debouncer.cancel().await;
        self.persist().await
    }

    /// Wait for any waiting or running autosave.
    pub async fn settle(&self) {
        self.debouncer.settle().await;
    }

    /// Save and report failures with a notice.
    async fn persist(&self) -> Result<DraftCase, DraftStoreError> {
        let result = self.save_now().await;
        if let Err(err) = &result {
            let description = match err.to_string() {
                message if message.is_empty() => SAVE_FAILED_FALLBACK.to_string(),
                message => message,
            };
            self.notice
                .notify(Notice::destructive(SAVE_FAILED_TITLE, description))
                .await;
        }
        result
    }

    /// Save the current workspace snapshot without any user-facing notice.
    ///
    /// On success only the stored id and the save time are adopted; edits made
    /// while the call was in flight are kept.
    pub async fn save_now(&self) -> Result<DraftCase, DraftStoreError> {
        let _guard = self.save_lock.lock().await;
        let payload = self.workspace.snapshot().await.to_payload();
        let span = info_span!("usecase.autosave.save", draft_id = ?payload.id);

        async {
            self.workspace.set_saving(true);
            let result = self.store.save_draft(payload).await;
            self.workspace.set_saving(false);

            match result {
                Ok(saved) => {
                    let saved_at = saved.updated_at.unwrap_or_else(|| self.clock.now());
                    self.workspace.record_saved(saved.id.clone(), saved_at).await;
                    info!(draft_id = %saved.id, %saved_at, "draft saved");
                    Ok(saved)
                }
                Err(err) => {
                    warn!(error = %err, "draft save failed");
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use mockall::predicate::always;
    use std::sync::Mutex as StdMutex;
    use sv_core::ids::DraftId;
    use sv_core::{CaseRole, FileCandidate, SaveDraftPayload, UploadKind, UploadedFile};

    mockall::mock! {
        pub Store {}

        #[async_trait]
        impl DraftStorePort for Store {
            async fn get_draft(&self) -> Result<Option<DraftCase>, DraftStoreError>;
            async fn save_draft(&self, payload: SaveDraftPayload) -> Result<DraftCase, DraftStoreError>;
            async fn upload_file(&self, file: FileCandidate, kind: UploadKind) -> Result<UploadedFile, DraftStoreError>;
            async fn submit_draft(&self, id: &DraftId) -> Result<(), DraftStoreError>;
        }
    }

    #[derive(Default)]
    struct RecordingNotice {
        notices: StdMutex<Vec<Notice>>,
    }

    #[async_trait]
    impl NoticePort for RecordingNotice {
        async fn notify(&self, notice: Notice) {
            self.notices.lock().unwrap().push(notice);
        }
    }

    struct FixedClock(DateTime<Utc>);

    impl ClockPort for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn saved_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 10, 30, 0).unwrap()
    }

    fn controller(
        store: MockStore,
    ) -> (Arc<AutosaveController>, Arc<DraftWorkspace>, Arc<RecordingNotice>) {
        let workspace = Arc::new(DraftWorkspace::default());
        let notice = Arc::new(RecordingNotice::default());
        let controller = Arc::new(AutosaveController::new(
            workspace.clone(),
            Arc::new(store),
            notice.clone(),
            Arc::new(FixedClock(saved_at())),
            DEFAULT_AUTOSAVE_DELAY,
        ));
        (controller, workspace, notice)
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_changes_produce_one_save_with_the_last_state() {
        let mut store = MockStore::new();
        store
            .expect_save_draft()
            .withf(|payload| payload.narrative == "v5")
            .times(1)
            .returning(|payload| {
                Ok(SaveDraftPayload {
                    id: Some(DraftId::from("draft_1")),
                    ..payload
                }
                .into_draft(saved_at()))
            });
        let (autosave, workspace, _) = controller(store);

        for i in 1..=5 {
            workspace.update(|d| d.narrative = format!("v{i}")).await;
            autosave.schedule().await;
            tokio::time::advance(Duration::from_millis(100)).await;
        }
        autosave.settle().await;

        assert_eq!(workspace.snapshot().await.id.as_str(), "draft_1");
        assert_eq!(workspace.last_saved_at().await, Some(saved_at()));
    }

    #[tokio::test(start_paused = true)]
    async fn flush_cancels_the_pending_save_and_persists_now() {
        let mut store = MockStore::new();
        store
            .expect_save_draft()
            .with(always())
            .times(1)
            .returning(|payload| Ok(payload.into_draft(saved_at())));
        let (autosave, workspace, _) = controller(store);

        workspace.update(|d| d.role = Some(CaseRole::Claimant)).await;
        autosave.schedule().await;
        assert!(autosave.is_pending().await);

        let saved = autosave.flush().await.unwrap();
        assert_eq!(saved.role, Some(CaseRole::Claimant));
        assert!(!autosave.is_pending().await);

        autosave.settle().await;
    }

    #[tokio::test]
    async fn failed_save_notifies_and_keeps_the_draft() {
        let mut store = MockStore::new();
        store
            .expect_save_draft()
            .returning(|_| Err(DraftStoreError::Api("API error 503".into())));
        let (autosave, workspace, notice) = controller(store);
        workspace.update(|d| d.accepted = true).await;

        assert!(autosave.flush().await.is_err());

        let notices = notice.notices.lock().unwrap().clone();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, SAVE_FAILED_TITLE);
        assert_eq!(notices[0].description.as_deref(), Some("API error 503"));
        assert!(workspace.snapshot().await.accepted);
        assert!(workspace.last_saved_at().await.is_none());
        assert!(!workspace.is_saving());
    }

    #[tokio::test]
    async fn save_now_falls_back_to_clock_when_store_omits_timestamp() {
        let mut store = MockStore::new();
        store.expect_save_draft().returning(|payload| {
            let mut draft = payload.into_draft(saved_at());
            draft.updated_at = None;
            Ok(draft)
        });
        let (autosave, workspace, notice) = controller(store);

        autosave.save_now().await.unwrap();

        assert_eq!(workspace.last_saved_at().await, Some(saved_at()));
        assert!(notice.notices.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn hydrate_absent_or_failing_store_keeps_defaults() {
        let mut store = MockStore::new();
        let mut calls = 0;
        store.expect_get_draft().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                Ok(None)
            } else {
                Err(DraftStoreError::Storage("disk".into()))
            }
        });
        let (autosave, workspace, _) = controller(store);

        assert!(autosave.hydrate().await.is_none());
        assert!(autosave.hydrate().await.is_none());
        assert_eq!(workspace.snapshot().await, DraftCase::default());
        assert!(!autosave.is_pending().await);
    }

    #[tokio::test]
    async fn hydrate_replaces_the_workspace_and_save_time() {
        let mut store = MockStore::new();
        store.expect_get_draft().returning(|| {
            Ok(Some(DraftCase {
                id: DraftId::from("draft_9"),
                role: Some(CaseRole::Defendant),
                updated_at: Some(saved_at()),
                ..DraftCase::default()
            }))
        });
        let (autosave, workspace, _) = controller(store);

        let draft = autosave.hydrate().await.unwrap();

        assert_eq!(draft.id.as_str(), "draft_9");
        assert_eq!(workspace.snapshot().await.role, Some(CaseRole::Defendant));
        assert_eq!(workspace.last_saved_at().await, Some(saved_at()));
    }
}
