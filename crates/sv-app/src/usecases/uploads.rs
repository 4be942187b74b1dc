//! Per-file upload lifecycle: capacity check, validation, async upload.

use std::sync::Arc;

use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use sv_core::case::{validate, FileRules};
use sv_core::ports::{DraftStorePort, Notice, NoticePort};
use sv_core::{FileCandidate, FileId, FileViolation, UploadKind, UploadStatus, UploadedFile};

use crate::usecases::autosave::AutosaveController;
use crate::usecases::workspace::DraftWorkspace;

/// Outcome of one `add_files` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddFilesReport {
    /// Entries created with status `uploading`, in selection order.
    pub added: Vec<FileId>,
    /// Considered candidates that failed validation.
    pub rejected: Vec<(String, Vec<FileViolation>)>,
    /// Candidates left out because the collection was full.
    pub over_limit: usize,
}

pub struct UploadTracker {
    workspace: Arc<DraftWorkspace>,
    store: Arc<dyn DraftStorePort>,
    notice: Arc<dyn NoticePort>,
    autosave: Arc<AutosaveController>,
    uploads: TaskTracker,
}

impl UploadTracker {
    pub fn new(
        workspace: Arc<DraftWorkspace>,
        store: Arc<dyn DraftStorePort>,
        notice: Arc<dyn NoticePort>,
        autosave: Arc<AutosaveController>,
    ) -> Self {
        Self {
            workspace,
            store,
            notice,
            autosave,
            uploads: TaskTracker::new(),
        }
    }

    /// Add a batch of selected files and start uploading the valid ones.
    pub async fn add_files(&self, kind: UploadKind, candidates: Vec<FileCandidate>) -> AddFilesReport {
        if candidates.is_empty() {
            return AddFilesReport::default();
        }
        let rules = FileRules::for_kind(kind);

        let (report, accepted) = self
            .workspace
            .update(|draft| {
                let remaining = draft.remaining_slots(kind);
                let over_limit = candidates.len().saturating_sub(remaining);
                let mut report = AddFilesReport {
                    over_limit,
                    ..AddFilesReport::default()
                };
                let mut accepted = Vec::new();

                for candidate in candidates.into_iter().take(remaining) {
                    let violations = validate(&candidate, &rules);
                    if !violations.is_empty() {
                        report.rejected.push((candidate.name.clone(), violations));
                        continue;
                    }
                    let entry = UploadedFile::uploading(&candidate, kind);
                    report.added.push(entry.id.clone());
                    draft.files_mut(kind).push(entry.clone());
                    accepted.push((entry, candidate));
                }
                (report, accepted)
            })
            .await;

        info!(
            kind = kind.as_str(),
            added = report.added.len(),
            rejected = report.rejected.len(),
            over_limit = report.over_limit,
            "files selected"
        );

        if !report.rejected.is_empty() {
            let description = report
                .rejected
                .iter()
                .map(|(name, violations)| {
                    let reasons: Vec<String> = violations.iter().map(ToString::to_string).collect();
                    format!("{name} : {}", reasons.join(", "))
                })
                .collect::<Vec<_>>()
                .join(" | ");
            self.notice
                .notify(Notice::destructive("Certains fichiers ont été rejetés", description))
                .await;
        }

        if report.over_limit > 0 {
            let noun = match kind {
                UploadKind::Contract => "contrat(s)",
                UploadKind::Evidence => "pièce(s)",
            };
            self.notice
                .notify(Notice::destructive(
                    "Limite atteinte",
                    format!("Vous ne pouvez ajouter que {} {noun} maximum.", kind.limit()),
                ))
                .await;
        }

        if !accepted.is_empty() {
            self.notice
                .notify(Notice::info(
                    "Fichiers ajoutés",
                    format!("{} fichier(s) en cours d'upload.", accepted.len()),
                ))
                .await;
            for (entry, candidate) in accepted {
                self.start_upload(entry, candidate);
            }
            self.autosave.schedule().await;
        }

        report
    }

    fn start_upload(&self, entry: UploadedFile, candidate: FileCandidate) {
        let workspace = Arc::clone(&self.workspace);
        let store = Arc::clone(&self.store);
        let notice = Arc::clone(&self.notice);
        let autosave = Arc::clone(&self.autosave);
        let kind = entry.kind;

        self.uploads.spawn(async move {
            debug!(file_id = %entry.id, name = %entry.name, "upload started");
            let outcome = store.upload_file(candidate, kind).await;

            let applied = workspace
                .update(|draft| match draft.find_file_mut(kind, &entry.id) {
                    Some(file) => {
                        match &outcome {
                            Ok(uploaded) => file.settle_with(uploaded),
                            Err(_) => file.status = UploadStatus::Error,
                        }
                        true
                    }
                    None => false,
                })
                .await;

            match &outcome {
                Ok(uploaded) => {
                    info!(file_id = %entry.id, remote_id = %uploaded.id, applied, "upload finished")
                }
                Err(err) => {
                    warn!(file_id = %entry.id, error = %err, applied, "upload failed");
                }
            }
            if !applied {
                // Removed while in flight.
                return;
            }
            if outcome.is_err() {
                notice
                    .notify(Notice::destructive("Echec de l'upload", entry.name.clone()))
                    .await;
            }
            autosave.schedule().await;
        });
    }

    /// Remove an entry in any status. An in-flight request is not cancelled;
    /// its completion is ignored.
    pub async fn remove_file(&self, kind: UploadKind, id: &FileId) -> bool {
        let removed = self.workspace.update(|draft| draft.remove_file(kind, id)).await;
        if removed {
            debug!(file_id = %id, kind = kind.as_str(), "file removed");
            self.autosave.schedule().await;
        }
        removed
    }

    pub async fn has_uploads_in_flight(&self) -> bool {
        self.workspace.update(|draft| draft.has_uploads_in_flight()).await
    }

    /// Wait until every upload started so far has completed.
    pub async fn settle(&self) {
        self.uploads.close();
        self.uploads.wait().await;
        self.uploads.reopen();
    }
}
