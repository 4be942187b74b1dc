//! Draft store port
//!
//! The only boundary between wizard state and storage. Implemented by the
//! local file store and by the HTTP API client.

use async_trait::async_trait;

use crate::case::{DraftCase, FileCandidate, SaveDraftPayload, UploadKind, UploadedFile};
use crate::ids::DraftId;
use crate::ports::errors::DraftStoreError;

#[async_trait]
pub trait DraftStorePort: Send + Sync {
    /// Read the stored draft; `None` when nothing has been saved yet.
    async fn get_draft(&self) -> Result<Option<DraftCase>, DraftStoreError>;

    /// Persist the draft and return the canonical copy with `updated_at` set.
    async fn save_draft(&self, payload: SaveDraftPayload) -> Result<DraftCase, DraftStoreError>;

    /// Upload one file; the returned entry has status `uploaded`.
    async fn upload_file(
        &self,
        file: FileCandidate,
        kind: UploadKind,
    ) -> Result<UploadedFile, DraftStoreError>;

    async fn submit_draft(&self, id: &DraftId) -> Result<(), DraftStoreError>;
}
