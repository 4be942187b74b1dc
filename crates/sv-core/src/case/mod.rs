//! Case-filing domain: the draft, its attachments and the rules they obey.

pub mod draft;
pub mod file;
pub mod narrative;
pub mod role;
pub mod validation;

pub use draft::{DraftCase, SaveDraftPayload};
pub use file::{FileCandidate, UploadKind, UploadStatus, UploadedFile, DEFAULT_MIME_TYPE};
pub use narrative::{Narrative, NARRATIVE_MAX_CHARS, NARRATIVE_MIN_CHARS};
pub use role::CaseRole;
pub use validation::{validate, FileRules, FileViolation, MAX_FILE_SIZE};
