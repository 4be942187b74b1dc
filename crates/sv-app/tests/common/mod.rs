#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use sv_app::CaseWizard;
use sv_core::ports::{
    ClockPort, DraftStoreError, DraftStorePort, NavigatorPort, Notice, NoticePort,
};
use sv_core::{
    DraftCase, DraftId, FileCandidate, FileId, SaveDraftPayload, UploadKind, UploadStatus,
    UploadedFile,
};

pub const UPLOAD_LATENCY: Duration = Duration::from_secs(1);
pub const AUTOSAVE_DELAY: Duration = Duration::from_millis(800);

/// Scripted draft store recording every call.
#[derive(Default)]
pub struct FakeStore {
    pub stored: Mutex<Option<DraftCase>>,
    pub calls: Mutex<Vec<String>>,
    pub saves: Mutex<Vec<SaveDraftPayload>>,
    pub fail_saves: AtomicBool,
    pub fail_submit: AtomicBool,
    uploads: AtomicUsize,
}

impl FakeStore {
    pub fn with_stored(draft: DraftCase) -> Self {
        let store = Self::default();
        *store.stored.lock().unwrap() = Some(draft);
        store
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    pub fn saves(&self) -> Vec<SaveDraftPayload> {
        self.saves.lock().unwrap().clone()
    }
}

#[async_trait]
impl DraftStorePort for FakeStore {
    async fn get_draft(&self) -> Result<Option<DraftCase>, DraftStoreError> {
        self.calls.lock().unwrap().push("get".into());
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn save_draft(&self, payload: SaveDraftPayload) -> Result<DraftCase, DraftStoreError> {
        self.calls.lock().unwrap().push("save".into());
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(DraftStoreError::Api("API error 503".into()));
        }
        self.saves.lock().unwrap().push(payload.clone());
        let saved = SaveDraftPayload {
            id: Some(DraftId::from("draft_srv")),
            ..payload
        }
        .into_draft(fixed_now());
        *self.stored.lock().unwrap() = Some(saved.clone());
        Ok(saved)
    }

    /// Files whose name contains `fail` are rejected by the backend.
    async fn upload_file(
        &self,
        file: FileCandidate,
        kind: UploadKind,
    ) -> Result<UploadedFile, DraftStoreError> {
        self.calls.lock().unwrap().push("upload".into());
        tokio::time::sleep(UPLOAD_LATENCY).await;
        if file.name.contains("fail") {
            return Err(DraftStoreError::Api("Upload failed (500)".into()));
        }
        let n = self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(UploadedFile {
            id: FileId::from(format!("doc_{n}")),
            name: file.name.clone(),
            size: file.size,
            mime_type: file.mime_type_or_default().to_string(),
            kind,
            status: UploadStatus::Uploaded,
            remote_id: None,
        })
    }

    async fn submit_draft(&self, id: &DraftId) -> Result<(), DraftStoreError> {
        self.calls.lock().unwrap().push(format!("submit:{id}"));
        if self.fail_submit.load(Ordering::SeqCst) {
            return Err(DraftStoreError::Api("Le service est indisponible".into()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotice {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotice {
    pub fn titles(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.title.clone())
            .collect()
    }

    pub fn find(&self, title: &str) -> Option<Notice> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.title == title)
            .cloned()
    }

    pub fn clear(&self) {
        self.notices.lock().unwrap().clear();
    }
}

#[async_trait]
impl NoticePort for RecordingNotice {
    async fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub left: AtomicUsize,
}

#[async_trait]
impl NavigatorPort for RecordingNavigator {
    async fn leave_wizard(&self) {
        self.left.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct FixedClock;

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        fixed_now()
    }
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 2, 14, 0, 0).unwrap()
}

pub struct Harness {
    pub wizard: CaseWizard,
    pub store: Arc<FakeStore>,
    pub notice: Arc<RecordingNotice>,
    pub navigator: Arc<RecordingNavigator>,
}

pub fn harness(store: FakeStore) -> Harness {
    let store = Arc::new(store);
    let notice = Arc::new(RecordingNotice::default());
    let navigator = Arc::new(RecordingNavigator::default());
    let wizard = CaseWizard::new(
        store.clone(),
        notice.clone(),
        navigator.clone(),
        Arc::new(FixedClock),
        AUTOSAVE_DELAY,
    );
    Harness {
        wizard,
        store,
        notice,
        navigator,
    }
}

pub fn pdf(name: &str, size: u64) -> FileCandidate {
    FileCandidate::with_declared_size(name, size).with_mime_type("application/pdf")
}

pub fn narrative_html(chars: usize) -> String {
    format!("<p>{}</p>", "a".repeat(chars))
}
