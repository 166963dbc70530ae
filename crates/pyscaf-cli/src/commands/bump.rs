//! `pyscaf bump` — raise the minimum Python version of an existing project.
//!
//! Rewrites `project.requires-python` in `pyproject.toml`, preserving any
//! upper-bound clause. Formatting of the rest of the document follows the
//! TOML serialiser, not the original file.

use std::path::Path;

use tracing::instrument;

use pyscaf_core::domain::{PythonVersion, VersionSpec};

use crate::{
    cli::BumpArgs,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(to = %args.to))]
pub fn execute(args: BumpArgs, output: OutputManager) -> CliResult<()> {
    let to: PythonVersion = args
        .to
        .parse()
        .map_err(|e| CliError::Core(pyscaf_core::error::PyscafError::Domain(e)))?;

    let pyproject_path = args.path.join("pyproject.toml");
    if !pyproject_path.exists() {
        return Err(CliError::FileNotFound {
            path: pyproject_path,
        });
    }

    let raw = std::fs::read_to_string(&pyproject_path).map_err(|e| CliError::IoError {
        message: format!("failed to read {}", pyproject_path.display()),
        source: e,
    })?;

    let (updated, old_spec, new_spec) = bump_requires_python(&raw, to)?;

    std::fs::write(&pyproject_path, updated).map_err(|e| CliError::IoError {
        message: format!("failed to write {}", pyproject_path.display()),
        source: e,
    })?;

    output.success(&format!(
        "requires-python: {old_spec} -> {new_spec} ({})",
        pyproject_path.display()
    ))?;
    Ok(())
}

/// Rewrite the requires-python spec inside a pyproject document.
///
/// Returns (new document, old spec, new spec).
fn bump_requires_python(raw: &str, to: PythonVersion) -> CliResult<(String, String, String)> {
    let mut doc: toml::Table = raw.parse().map_err(|e: toml::de::Error| CliError::InvalidInput {
        message: format!("pyproject.toml is not valid TOML: {e}"),
        source: Some(Box::new(e)),
    })?;

    let project = doc
        .entry("project")
        .or_insert_with(|| toml::Value::Table(toml::Table::new()));
    let project = project
        .as_table_mut()
        .ok_or_else(|| CliError::InvalidInput {
            message: "[project] is not a table".into(),
            source: None,
        })?;

    let old_spec = project
        .get("requires-python")
        .and_then(|v| v.as_str())
        .unwrap_or(">=3.10")
        .to_string();
    let new_spec = VersionSpec::bump_min(&old_spec, to);

    project.insert(
        "requires-python".to_string(),
        toml::Value::String(new_spec.clone()),
    );

    let updated = toml::to_string_pretty(&doc).map_err(|e| CliError::InvalidInput {
        message: format!("failed to serialise pyproject.toml: {e}"),
        source: Some(Box::new(e)),
    })?;

    Ok((updated, old_spec, new_spec))
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const PYPROJECT: &str = r#"[project]
name = "demo"
requires-python = ">=3.10,<3.13"

[tool.pytest.ini_options]
testpaths = ["tests"]
"#;

    #[test]
    fn bump_rewrites_lower_bound_only() {
        let (updated, old, new) =
            bump_requires_python(PYPROJECT, PythonVersion::new(3, 12)).unwrap();
        assert_eq!(old, ">=3.10,<3.13");
        assert_eq!(new, ">=3.12,<3.13");
        assert!(updated.contains(">=3.12,<3.13"));
        // Unrelated tables survive the round-trip.
        assert!(updated.contains("testpaths"));
    }

    #[test]
    fn missing_spec_defaults_then_bumps() {
        let raw = "[project]\nname = \"demo\"\n";
        let (updated, old, new) = bump_requires_python(raw, PythonVersion::new(3, 11)).unwrap();
        assert_eq!(old, ">=3.10");
        assert_eq!(new, ">=3.11");
        assert!(updated.contains("requires-python"));
    }

    #[test]
    fn invalid_toml_is_rejected() {
        let result = bump_requires_python("not [valid toml", PythonVersion::new(3, 11));
        assert!(matches!(result, Err(CliError::InvalidInput { .. })));
    }
}
