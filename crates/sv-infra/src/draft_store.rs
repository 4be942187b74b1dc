//! File-based draft store
//!
//! Local stand-in for the backend: the draft lives in one JSON file, uploads
//! and submission are simulated with a delay.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use sv_core::ports::{ClockPort, DraftStoreError, DraftStorePort};
use sv_core::{
    DraftCase, DraftId, FileCandidate, FileId, SaveDraftPayload, UploadKind, UploadStatus,
    UploadedFile,
};

pub const DEFAULT_DRAFT_FILE: &str = "solvilo_case_draft_v1.json";

/// Delays applied to simulated backend calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedLatency {
    /// Submission waits exactly this long; an upload waits this long plus up
    /// to the same amount again.
    pub base: Duration,
}

impl SimulatedLatency {
    pub const fn new(base: Duration) -> Self {
        Self { base }
    }

    pub const fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    fn upload_delay(&self) -> Duration {
        let base_ms = self.base.as_millis() as u64;
        let jitter_ms = rand::rng().random_range(0..=base_ms);
        Duration::from_millis(base_ms + jitter_ms)
    }
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self::new(Duration::from_millis(800))
    }
}

pub struct FileDraftStore {
    draft_file_path: PathBuf,
    clock: Arc<dyn ClockPort>,
    latency: SimulatedLatency,
}

impl FileDraftStore {
    pub fn new(draft_file_path: PathBuf, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            draft_file_path,
            clock,
            latency: SimulatedLatency::default(),
        }
    }

    /// Create store with base dir and the default file name
    pub fn with_defaults(base_dir: PathBuf, clock: Arc<dyn ClockPort>) -> Self {
        Self::new(base_dir.join(DEFAULT_DRAFT_FILE), clock)
    }

    pub fn with_latency(mut self, latency: SimulatedLatency) -> Self {
        self.latency = latency;
        self
    }

    async fn ensure_parent_dir(&self) -> Result<(), DraftStoreError> {
        if let Some(parent) = self.draft_file_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DraftStoreError::Storage(format!("Failed to create draft dir: {e}")))?;
        }
        Ok(())
    }

    async fn write_draft(&self, draft: &DraftCase) -> Result<(), DraftStoreError> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_string_pretty(draft)
            .map_err(|e| DraftStoreError::Serialization(e.to_string()))?;

        let mut file = fs::File::create(&self.draft_file_path)
            .await
            .map_err(|e| DraftStoreError::Storage(format!("Failed to create draft file: {e}")))?;

        file.write_all(json.as_bytes())
            .await
            .map_err(|e| DraftStoreError::Storage(format!("Failed to write draft file: {e}")))?;

        file.sync_all()
            .await
            .map_err(|e| DraftStoreError::Storage(format!("Failed to sync draft file: {e}")))?;

        Ok(())
    }
}

#[async_trait]
impl DraftStorePort for FileDraftStore {
    async fn get_draft(&self) -> Result<Option<DraftCase>, DraftStoreError> {
        if !self.draft_file_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.draft_file_path)
            .await
            .map_err(|e| DraftStoreError::Storage(format!("Failed to read draft file: {e}")))?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        match serde_json::from_str::<DraftCase>(&content) {
            Ok(draft) => Ok(Some(draft)),
            Err(e) => {
                warn!(path = %self.draft_file_path.display(), error = %e, "ignoring unreadable draft file");
                Ok(None)
            }
        }
    }

    async fn save_draft(&self, payload: SaveDraftPayload) -> Result<DraftCase, DraftStoreError> {
        let draft = payload.into_draft(self.clock.now());
        self.write_draft(&draft).await?;
        debug!(draft_id = %draft.id, "draft written");
        Ok(draft)
    }

    async fn upload_file(
        &self,
        file: FileCandidate,
        kind: UploadKind,
    ) -> Result<UploadedFile, DraftStoreError> {
        sleep(self.latency.upload_delay()).await;
        Ok(UploadedFile {
            id: FileId::generate(kind),
            name: file.name.clone(),
            size: file.size,
            mime_type: file.mime_type_or_default().to_string(),
            kind,
            status: UploadStatus::Uploaded,
            remote_id: None,
        })
    }

    async fn submit_draft(&self, id: &DraftId) -> Result<(), DraftStoreError> {
        sleep(self.latency.base).await;
        info!(draft_id = %id, "draft submitted (simulated)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use sv_core::CaseRole;
    use tempfile::TempDir;

    struct FixedClock(DateTime<Utc>);

    impl ClockPort for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 6, 7, 8, 9).unwrap()
    }

    fn store(dir: &TempDir) -> FileDraftStore {
        FileDraftStore::with_defaults(dir.path().join("nested"), Arc::new(FixedClock(at())))
            .with_latency(SimulatedLatency::none())
    }

    #[tokio::test]
    async fn test_get_draft_returns_none_when_file_not_exists() {
        let temp_dir = TempDir::new().unwrap();
        assert!(store(&temp_dir).get_draft().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_get_round_trips_with_timestamp() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);

        let mut draft = DraftCase::default();
        draft.role = Some(CaseRole::Claimant);
        draft.narrative = "Les faits".into();
        let saved = store.save_draft(draft.to_payload()).await.unwrap();

        assert_eq!(saved.id.as_str(), "local-draft");
        assert_eq!(saved.updated_at, Some(at()));

        let loaded = store.get_draft().await.unwrap().unwrap();
        assert_eq!(loaded, saved);
    }

    #[tokio::test]
    async fn test_save_without_id_uses_local_draft_id() {
        let temp_dir = TempDir::new().unwrap();
        let mut payload = DraftCase::default().to_payload();
        payload.id = None;

        let saved = store(&temp_dir).save_draft(payload).await.unwrap();

        assert!(saved.id.is_local());
    }

    #[tokio::test]
    async fn test_corrupt_or_empty_file_reads_as_absent() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        let path = temp_dir.path().join("nested").join(DEFAULT_DRAFT_FILE);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();

        std::fs::write(&path, "{not json").unwrap();
        assert!(store.get_draft().await.unwrap().is_none());

        std::fs::write(&path, "  \n").unwrap();
        assert!(store.get_draft().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upload_returns_uploaded_entry_with_kind_prefixed_id() {
        let temp_dir = TempDir::new().unwrap();
        let file = FileCandidate::new("preuve.png", vec![0u8; 16]);

        let uploaded = store(&temp_dir)
            .upload_file(file, UploadKind::Evidence)
            .await
            .unwrap();

        assert!(uploaded.id.as_str().starts_with("evidence_"));
        assert_eq!(uploaded.status, UploadStatus::Uploaded);
        assert_eq!(uploaded.size, 16);
        assert_eq!(uploaded.mime_type, "application/octet-stream");
    }

    #[test]
    fn test_upload_delay_stays_within_bounds() {
        let latency = SimulatedLatency::new(Duration::from_millis(800));
        for _ in 0..50 {
            let delay = latency.upload_delay();
            assert!(delay >= Duration::from_millis(800));
            assert!(delay <= Duration::from_millis(1600));
        }
    }
}
