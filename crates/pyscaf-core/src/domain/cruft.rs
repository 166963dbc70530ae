//! The `.cruft.json` tracking document.
//!
//! Records which template revision produced a generated project, so external
//! update/diff tooling can compare the project against newer template
//! revisions. The document is written once after generation and never
//! rewritten: the `commit` field, once set, is frozen.

use serde::{Deserialize, Serialize};

use crate::domain::entities::params::ProjectParams;
use crate::domain::error::DomainError;
use crate::domain::value_objects::CommitHash;

/// Fixed file name, relative to the generated project root.
pub const CRUFT_FILE: &str = ".cruft.json";

/// The tracking document.
///
/// Shape on disk:
///
/// ```json
/// {
///   "template": "https://github.com/aamersdq/pyscaf",
///   "context": { "project_name": "...", "python_min": "3.10", ... },
///   "commit": "0123abcd…"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CruftMetadata {
    /// Source URL or local path of the template.
    pub template: String,
    /// Snapshot of the generation parameters.
    pub context: ProjectParams,
    /// Template revision the project was generated from. `None` only while
    /// resolution is still pending; never null on disk after generation.
    pub commit: Option<CommitHash>,
}

impl CruftMetadata {
    pub fn new(template: impl Into<String>, context: ProjectParams) -> Self {
        Self {
            template: template.into(),
            context,
            commit: None,
        }
    }

    /// Attach the resolved commit. Write-once: a second call is a no-op,
    /// preserving the original tracking commit.
    pub fn with_commit(mut self, commit: CommitHash) -> Self {
        if self.commit.is_none() {
            self.commit = Some(commit);
        }
        self
    }

    pub fn is_tracked(&self) -> bool {
        self.commit.is_some()
    }

    /// Serialize to the on-disk representation.
    pub fn to_json(&self) -> Result<String, DomainError> {
        serde_json::to_string_pretty(self).map_err(|e| DomainError::TrackingRejected {
            reason: format!("serialisation failed: {e}"),
        })
    }

    /// Parse an existing on-disk document.
    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        serde_json::from_str(raw).map_err(|e| DomainError::TrackingRejected {
            reason: format!("malformed {CRUFT_FILE}: {e}"),
        })
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ProjectParams {
        ProjectParams::builder("Test Project").build().unwrap()
    }

    fn sha(fill: char) -> CommitHash {
        CommitHash::parse(&fill.to_string().repeat(40)).unwrap()
    }

    #[test]
    fn commit_is_write_once() {
        let meta = CruftMetadata::new("https://example.com/tpl", params())
            .with_commit(sha('a'))
            .with_commit(sha('b'));
        assert_eq!(meta.commit, Some(sha('a')));
    }

    #[test]
    fn untracked_until_commit_set() {
        let meta = CruftMetadata::new("https://example.com/tpl", params());
        assert!(!meta.is_tracked());
        assert!(meta.with_commit(sha('c')).is_tracked());
    }

    #[test]
    fn round_trips_through_json() {
        let meta = CruftMetadata::new("https://example.com/tpl", params()).with_commit(sha('d'));
        let json = meta.to_json().unwrap();
        let parsed = CruftMetadata::from_json(&json).unwrap();
        assert_eq!(parsed, meta);
    }

    #[test]
    fn json_exposes_expected_fields() {
        let meta = CruftMetadata::new("https://example.com/tpl", params()).with_commit(sha('e'));
        let json = meta.to_json().unwrap();
        assert!(json.contains("\"template\""));
        assert!(json.contains("\"context\""));
        assert!(json.contains(&"e".repeat(40)));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            CruftMetadata::from_json("{not json"),
            Err(DomainError::TrackingRejected { .. })
        ));
    }
}
