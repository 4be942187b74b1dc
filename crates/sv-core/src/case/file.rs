//! Attachments: the file a user picked and the tracked upload entry it becomes.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::ids::FileId;

pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Which collection of the draft an attachment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    Contract,
    Evidence,
}

impl UploadKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contract => "contract",
            Self::Evidence => "evidence",
        }
    }

    /// Maximum number of attachments of this kind a draft may hold.
    pub fn limit(self) -> usize {
        match self {
            Self::Contract => crate::case::validation::CONTRACT_LIMIT,
            Self::Evidence => crate::case::validation::EVIDENCE_LIMIT,
        }
    }
}

impl std::fmt::Display for UploadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of one attachment: `Uploading -> Uploaded | Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Uploading,
    Uploaded,
    Error,
}

/// A file selected by the user, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub size: u64,
    pub mime_type: Option<String>,
    pub content: Bytes,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let content = content.into();
        Self {
            name: name.into(),
            size: content.len() as u64,
            mime_type: None,
            content,
        }
    }

    /// Candidate whose declared size is known but whose bytes are not loaded yet.
    pub fn with_declared_size(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: None,
            content: Bytes::new(),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Lower-cased substring after the last `.`, empty when the name has none.
    pub fn extension(&self) -> String {
        match self.name.rsplit_once('.') {
            Some((_, ext)) => ext.to_lowercase(),
            None => String::new(),
        }
    }

    pub fn mime_type_or_default(&self) -> &str {
        self.mime_type
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MIME_TYPE)
    }
}

/// One tracked attachment of a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: FileId,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub kind: UploadKind,
    pub status: UploadStatus,
    /// Document id assigned by the backend once the upload succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,
}

impl UploadedFile {
    /// Fresh entry in `Uploading` state for a validated candidate.
    pub fn uploading(candidate: &FileCandidate, kind: UploadKind) -> Self {
        Self {
            id: FileId::generate(kind),
            name: candidate.name.clone(),
            size: candidate.size,
            mime_type: candidate.mime_type_or_default().to_string(),
            kind,
            status: UploadStatus::Uploading,
            remote_id: None,
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.status == UploadStatus::Uploading
    }

    pub fn is_uploaded(&self) -> bool {
        self.status == UploadStatus::Uploaded
    }

    pub fn is_failed(&self) -> bool {
        self.status == UploadStatus::Error
    }

    /// Apply the backend's answer to this entry. The client id and the
    /// captured file facts are kept; only status and server fields move.
    pub fn settle_with(&mut self, uploaded: &UploadedFile) {
        self.status = UploadStatus::Uploaded;
        self.remote_id = Some(uploaded.id.as_str().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_last_segment_lowercased() {
        assert_eq!(FileCandidate::new("Contrat.Final.PDF", "x").extension(), "pdf");
        assert_eq!(FileCandidate::new("archive.tar.gz", "x").extension(), "gz");
        assert_eq!(FileCandidate::new("README", "x").extension(), "");
    }

    #[test]
    fn uploading_entry_captures_candidate_facts() {
        let candidate = FileCandidate::new("bail.pdf", vec![0u8; 42]).with_mime_type("application/pdf");
        let entry = UploadedFile::uploading(&candidate, UploadKind::Contract);

        assert_eq!(entry.name, "bail.pdf");
        assert_eq!(entry.size, 42);
        assert_eq!(entry.mime_type, "application/pdf");
        assert_eq!(entry.kind, UploadKind::Contract);
        assert!(entry.is_uploading());
        assert!(entry.id.as_str().starts_with("contract_"));
    }

    #[test]
    fn unknown_mime_type_falls_back_to_octet_stream() {
        let candidate = FileCandidate::new("photo.png", "x").with_mime_type("");
        let entry = UploadedFile::uploading(&candidate, UploadKind::Evidence);
        assert_eq!(entry.mime_type, DEFAULT_MIME_TYPE);
    }

    #[test]
    fn settle_keeps_client_id_and_records_remote_id() {
        let candidate = FileCandidate::new("bail.pdf", "x");
        let mut entry = UploadedFile::uploading(&candidate, UploadKind::Contract);
        let client_id = entry.id.clone();

        let mut server = entry.clone();
        server.id = FileId::from("doc_991");
        server.status = UploadStatus::Uploaded;

        entry.settle_with(&server);
        assert_eq!(entry.id, client_id);
        assert!(entry.is_uploaded());
        assert_eq!(entry.remote_id.as_deref(), Some("doc_991"));
    }

    #[test]
    fn uploaded_file_uses_camel_case_on_the_wire() {
        let candidate = FileCandidate::new("bail.pdf", "x").with_mime_type("application/pdf");
        let entry = UploadedFile::uploading(&candidate, UploadKind::Contract);
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["mimeType"], "application/pdf");
        assert_eq!(json["kind"], "contract");
        assert_eq!(json["status"], "uploading");
        assert!(json.get("remoteId").is_none());
    }
}
