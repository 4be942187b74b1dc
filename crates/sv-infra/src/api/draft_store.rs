use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Deserialize;
use tracing::info;

use sv_core::ports::{DraftStoreError, DraftStorePort};
use sv_core::{
    DraftCase, DraftId, FileCandidate, FileId, SaveDraftPayload, UploadKind, UploadStatus,
    UploadedFile,
};

use super::client::{required, ApiClient, ApiError};

/// Body of `POST /cases/documents`. Only the id is mandatory; the rest falls
/// back to what was sent, and any `status` the server reports is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentResponse {
    id: FileId,
    name: Option<String>,
    size: Option<u64>,
    mime_type: Option<String>,
    kind: Option<UploadKind>,
}

impl DocumentResponse {
    fn into_uploaded(self, sent: &FileCandidate, kind: UploadKind) -> UploadedFile {
        UploadedFile {
            id: self.id,
            name: self.name.unwrap_or_else(|| sent.name.clone()),
            size: self.size.unwrap_or(sent.size),
            mime_type: self
                .mime_type
                .unwrap_or_else(|| sent.mime_type_or_default().to_string()),
            kind: self.kind.unwrap_or(kind),
            status: UploadStatus::Uploaded,
            remote_id: None,
        }
    }
}

pub struct HttpDraftStore {
    client: Arc<ApiClient>,
}

impl HttpDraftStore {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DraftStorePort for HttpDraftStore {
    async fn get_draft(&self) -> Result<Option<DraftCase>, DraftStoreError> {
        let draft = self.client.get::<Option<DraftCase>>("/cases/draft").await?;
        Ok(draft.flatten())
    }

    async fn save_draft(&self, payload: SaveDraftPayload) -> Result<DraftCase, DraftStoreError> {
        let saved = self
            .client
            .send_json::<_, DraftCase>(Method::PUT, "/cases/draft", &payload)
            .await?;
        Ok(required(saved)?)
    }

    async fn upload_file(
        &self,
        file: FileCandidate,
        kind: UploadKind,
    ) -> Result<UploadedFile, DraftStoreError> {
        let part = Part::bytes(file.content.to_vec())
            .file_name(file.name.clone())
            .mime_str(file.mime_type_or_default())
            .map_err(ApiError::from)?;
        let form = Form::new().part("file", part).text("kind", kind.as_str());

        let request = self
            .client
            .request(Method::POST, "/cases/documents")
            .multipart(form);
        let response = self.client.execute(request).await.map_err(|err| match err {
            ApiError::Status { status, .. } => DraftStoreError::Api(format!("Upload failed ({status})")),
            other => other.into(),
        })?;

        let document = required(ApiClient::read_json::<DocumentResponse>(response).await?)?;
        let uploaded = document.into_uploaded(&file, kind);
        info!(name = %uploaded.name, remote_id = %uploaded.id, "document uploaded");
        Ok(uploaded)
    }

    async fn submit_draft(&self, id: &DraftId) -> Result<(), DraftStoreError> {
        self.client
            .post_empty(&format!("/cases/draft/{id}/submit"))
            .await?;
        Ok(())
    }
}
