//! ID type wrappers for type safety.

mod id_macro;

use crate::case::UploadKind;
use id_macro::string_id;

string_id! {
    /// Identifier of a case draft.
    ///
    /// `"local-draft"` until the backend assigns a canonical id.
    DraftId;

    /// Identifier of one attachment, generated client-side at selection time.
    FileId;

    CaseId;
    MessageId;
    NotificationId;
    UserId;
}

/// Placeholder id of a draft that was never persisted by the backend.
pub const LOCAL_DRAFT_ID: &str = "local-draft";

impl DraftId {
    pub fn local() -> Self {
        Self(LOCAL_DRAFT_ID.to_string())
    }

    pub fn is_local(&self) -> bool {
        self.0 == LOCAL_DRAFT_ID
    }
}

impl Default for DraftId {
    fn default() -> Self {
        Self::local()
    }
}

impl FileId {
    /// Generate a fresh id of the form `"<kind>_<uuid>"`.
    pub fn generate(kind: UploadKind) -> Self {
        Self(format!("{}_{}", kind.as_str(), uuid::Uuid::new_v4()))
    }
}

impl MessageId {
    pub fn generate() -> Self {
        Self(format!("msg_{}", uuid::Uuid::new_v4()))
    }
}
