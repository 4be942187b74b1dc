//! The case draft: the wizard's persisted unit of work.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::case::file::{UploadKind, UploadedFile};
use crate::case::narrative::{self, Narrative, EMPTY_NARRATIVE_HTML};
use crate::case::role::CaseRole;
use crate::ids::{DraftId, FileId};

/// Draft of a case filing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftCase {
    #[serde(default)]
    pub id: DraftId,
    #[serde(default)]
    pub role: Option<CaseRole>,
    #[serde(default)]
    pub narrative: String,
    #[serde(default)]
    pub narrative_html: Option<String>,
    #[serde(default)]
    pub contracts: Vec<UploadedFile>,
    #[serde(default)]
    pub evidence: Vec<UploadedFile>,
    #[serde(default)]
    pub accepted: bool,
    /// Set by the draft store on every successful save.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for DraftCase {
    fn default() -> Self {
        Self {
            id: DraftId::local(),
            role: None,
            narrative: String::new(),
            narrative_html: Some(EMPTY_NARRATIVE_HTML.to_string()),
            contracts: Vec::new(),
            evidence: Vec::new(),
            accepted: false,
            updated_at: None,
        }
    }
}

impl DraftCase {
    /// Normalize a draft read back from storage.
    ///
    /// Plain text is re-derived from the rich text when missing, the rich text
    /// falls back to the plain text, and the plain text is clamped.
    pub fn hydrated(mut self) -> Self {
        if self.narrative.is_empty() {
            if let Some(html) = self.narrative_html.as_deref() {
                self.narrative = narrative::html_to_plain_text(html);
            }
        }
        self.narrative = narrative::clamp(&self.narrative);
        if self.narrative_html.as_deref().map_or(true, str::is_empty) {
            self.narrative_html = Some(if self.narrative.is_empty() {
                EMPTY_NARRATIVE_HTML.to_string()
            } else {
                self.narrative.clone()
            });
        }
        self
    }

    pub fn set_narrative(&mut self, narrative: Narrative) {
        self.narrative_html = Some(narrative.html);
        self.narrative = narrative::clamp(&narrative.plain);
    }

    pub fn narrative_len(&self) -> usize {
        narrative::char_len(&self.narrative)
    }

    pub fn files(&self, kind: UploadKind) -> &[UploadedFile] {
        match kind {
            UploadKind::Contract => &self.contracts,
            UploadKind::Evidence => &self.evidence,
        }
    }

    pub fn files_mut(&mut self, kind: UploadKind) -> &mut Vec<UploadedFile> {
        match kind {
            UploadKind::Contract => &mut self.contracts,
            UploadKind::Evidence => &mut self.evidence,
        }
    }

    /// Free slots left for `kind` before the per-kind limit is reached.
    pub fn remaining_slots(&self, kind: UploadKind) -> usize {
        kind.limit().saturating_sub(self.files(kind).len())
    }

    pub fn find_file_mut(&mut self, kind: UploadKind, id: &FileId) -> Option<&mut UploadedFile> {
        self.files_mut(kind).iter_mut().find(|f| &f.id == id)
    }

    /// Remove the entry with `id`; returns whether it was present.
    pub fn remove_file(&mut self, kind: UploadKind, id: &FileId) -> bool {
        let files = self.files_mut(kind);
        let before = files.len();
        files.retain(|f| &f.id != id);
        files.len() != before
    }

    fn all_files(&self) -> impl Iterator<Item = &UploadedFile> {
        self.contracts.iter().chain(self.evidence.iter())
    }

    pub fn has_uploads_in_flight(&self) -> bool {
        self.all_files().any(UploadedFile::is_uploading)
    }

    pub fn has_failed_uploads(&self, kind: UploadKind) -> bool {
        self.files(kind).iter().any(UploadedFile::is_failed)
    }

    pub fn all_contracts_uploaded(&self) -> bool {
        self.contracts.iter().all(UploadedFile::is_uploaded)
    }

    pub fn to_payload(&self) -> SaveDraftPayload {
        SaveDraftPayload {
            id: Some(self.id.clone()),
            role: self.role,
            narrative: self.narrative.clone(),
            narrative_html: self.narrative_html.clone(),
            contracts: self.contracts.clone(),
            evidence: self.evidence.clone(),
            accepted: self.accepted,
        }
    }
}

/// Body of a draft save request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDraftPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DraftId>,
    pub role: Option<CaseRole>,
    pub narrative: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative_html: Option<String>,
    pub contracts: Vec<UploadedFile>,
    pub evidence: Vec<UploadedFile>,
    pub accepted: bool,
}

impl SaveDraftPayload {
    /// Canonical draft for this payload, stamped at `updated_at`.
    pub fn into_draft(self, updated_at: DateTime<Utc>) -> DraftCase {
        DraftCase {
            id: self.id.unwrap_or_default(),
            role: self.role,
            narrative: self.narrative,
            narrative_html: self.narrative_html,
            contracts: self.contracts,
            evidence: self.evidence,
            accepted: self.accepted,
            updated_at: Some(updated_at),
        }
    }
}
