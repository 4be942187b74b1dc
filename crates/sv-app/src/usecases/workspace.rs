//! Shared in-memory form state of the wizard.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};

use sv_core::{DraftCase, DraftId};

/// Draft being edited plus its save bookkeeping.
///
/// The wizard writes the scalar fields, the upload tracker writes the file
/// collections, autosave reads snapshots and adopts the stored id.
pub struct DraftWorkspace {
    draft: Mutex<DraftCase>,
    last_saved_at: RwLock<Option<DateTime<Utc>>>,
    is_saving: AtomicBool,
}

impl DraftWorkspace {
    pub fn new(draft: DraftCase) -> Self {
        Self {
            last_saved_at: RwLock::new(draft.updated_at),
            draft: Mutex::new(draft),
            is_saving: AtomicBool::new(false),
        }
    }

    pub async fn snapshot(&self) -> DraftCase {
        self.draft.lock().await.clone()
    }

    /// Run `f` against the draft while holding the lock.
    pub async fn update<R>(&self, f: impl FnOnce(&mut DraftCase) -> R) -> R {
        let mut guard = self.draft.lock().await;
        f(&mut guard)
    }

    pub async fn replace(&self, draft: DraftCase) {
        *self.last_saved_at.write().await = draft.updated_at;
        *self.draft.lock().await = draft;
    }

    /// Adopt the id assigned by the store and record when it saved.
    pub async fn record_saved(&self, id: DraftId, saved_at: DateTime<Utc>) {
        self.draft.lock().await.id = id;
        *self.last_saved_at.write().await = Some(saved_at);
    }

    pub async fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        *self.last_saved_at.read().await
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving.load(Ordering::SeqCst)
    }

    pub(crate) fn set_saving(&self, saving: bool) {
        self.is_saving.store(saving, Ordering::SeqCst);
    }
}

impl Default for DraftWorkspace {
    fn default() -> Self {
        Self::new(DraftCase::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sv_core::CaseRole;

    #[tokio::test]
    async fn record_saved_keeps_form_fields() {
        let workspace = DraftWorkspace::default();
        workspace
            .update(|draft| draft.role = Some(CaseRole::Defendant))
            .await;

        let at = Utc::now();
        workspace.record_saved(DraftId::from("draft_42"), at).await;

        let draft = workspace.snapshot().await;
        assert_eq!(draft.id.as_str(), "draft_42");
        assert_eq!(draft.role, Some(CaseRole::Defendant));
        assert_eq!(workspace.last_saved_at().await, Some(at));
    }

    #[tokio::test]
    async fn replace_takes_last_saved_from_the_draft() {
        let workspace = DraftWorkspace::default();
        let at = Utc::now();
        workspace
            .replace(DraftCase {
                updated_at: Some(at),
                ..DraftCase::default()
            })
            .await;
        assert_eq!(workspace.last_saved_at().await, Some(at));
    }
}
