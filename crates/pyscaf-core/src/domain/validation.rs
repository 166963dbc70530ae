//! Cross-entity validation entry points used by the application layer.
//!
//! Individual entities validate themselves; this module is the single place
//! services call before acting on a combination of them.

use crate::domain::entities::blueprint::Blueprint;
use crate::domain::entities::project_structure::ProjectStructure;
use crate::domain::error::DomainError;
use crate::domain::tokens::TokenMap;

pub struct DomainValidator;

impl DomainValidator {
    /// Validate a blueprint before rendering.
    pub fn validate_blueprint(blueprint: &Blueprint) -> Result<(), DomainError> {
        blueprint.validate()
    }

    /// Validate a rendered structure before writing.
    pub fn validate_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }

    /// Enforce the no-leftover-token invariant over a rendered structure.
    ///
    /// Every emitted file must be free of `__NAME__` placeholders; the first
    /// survivor is reported with its path.
    pub fn validate_no_leftover_tokens(structure: &ProjectStructure) -> Result<(), DomainError> {
        for file in structure.files() {
            if let Some(token) = TokenMap::remaining(&file.content).into_iter().next() {
                return Err(DomainError::UnresolvedToken {
                    token,
                    path: file.path.display().to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::common::Permissions;

    #[test]
    fn leftover_token_is_flagged_with_path() {
        let mut structure = ProjectStructure::new("/tmp/x");
        structure.add_file(
            "README.md",
            "requires __PY_MIN__".into(),
            Permissions::read_write(),
        );

        match DomainValidator::validate_no_leftover_tokens(&structure) {
            Err(DomainError::UnresolvedToken { token, path }) => {
                assert_eq!(token, "__PY_MIN__");
                assert_eq!(path, "README.md");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn clean_structure_passes() {
        let mut structure = ProjectStructure::new("/tmp/x");
        structure.add_file("README.md", "requires 3.10".into(), Permissions::read_write());
        assert!(DomainValidator::validate_no_leftover_tokens(&structure).is_ok());
    }
}
