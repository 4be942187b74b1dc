//! File validation policy.
//!
//! Pure checks run once per candidate at selection time. Capacity limits are
//! enforced by the caller before validation, see [`UploadKind::limit`].

use crate::case::file::{FileCandidate, UploadKind};

/// Upper bound for a single attachment: 10 MiB.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

pub const CONTRACT_LIMIT: usize = 5;
pub const EVIDENCE_LIMIT: usize = 20;

pub const CONTRACT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];
pub const EVIDENCE_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png", "doc", "docx"];

/// Why a candidate file was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum FileViolation {
    #[error("disallowed format")]
    DisallowedFormat,
    #[error("file too large")]
    TooLarge,
}

/// Bounds a candidate is checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRules {
    pub max_size: u64,
    pub allowed_extensions: Vec<String>,
}

impl FileRules {
    /// Allow-list entries are normalized: lower-cased, leading `*.` or `.` dropped.
    pub fn new<I, S>(max_size: u64, allowed_extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            max_size,
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|ext| {
                    let ext = ext.as_ref().trim();
                    let ext = ext.strip_prefix("*.").unwrap_or(ext);
                    ext.strip_prefix('.').unwrap_or(ext).to_lowercase()
                })
                .collect(),
        }
    }

    pub fn for_kind(kind: UploadKind) -> Self {
        match kind {
            UploadKind::Contract => Self::new(MAX_FILE_SIZE, CONTRACT_EXTENSIONS),
            UploadKind::Evidence => Self::new(MAX_FILE_SIZE, EVIDENCE_EXTENSIONS),
        }
    }

    pub fn allows_extension(&self, extension: &str) -> bool {
        !extension.is_empty() && self.allowed_extensions.iter().any(|e| e == extension)
    }
}

/// Check `file` against `rules`; an empty result means the file is accepted.
///
/// Both violations are evaluated independently and may fire together.
pub fn validate(file: &FileCandidate, rules: &FileRules) -> Vec<FileViolation> {
    let mut violations = Vec::new();

    if !rules.allows_extension(&file.extension()) {
        violations.push(FileViolation::DisallowedFormat);
    }

    if file.size > rules.max_size {
        violations.push(FileViolation::TooLarge);
    }

    violations
}
