//! `pyscaf check` — validate a generated project.
//!
//! Checks, in order:
//! 1. No `__NAME__` placeholder token survives in any text file.
//! 2. `.cruft.json` exists, parses, and carries a 40-hex tracking commit.
//! 3. Every workflow under `.github/workflows/` parses as YAML.
//! 4. The file set matches the recorded project type (paper files present
//!    for paper projects, absent otherwise).
//!
//! Violations are collected, not short-circuited, so one run reports
//! everything wrong with a project.

use std::path::Path;

use tracing::{debug, instrument};
use walkdir::WalkDir;

use pyscaf_core::domain::{CRUFT_FILE, CruftMetadata, ProjectType, TokenMap};

use crate::{
    cli::CheckArgs,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Directories never scanned for leftover tokens.
const SKIPPED_DIRS: &[&str] = &[".git", ".venv", "__pycache__", ".mypy_cache", ".ruff_cache"];

#[instrument(skip_all, fields(path = %args.path.display()))]
pub fn execute(args: CheckArgs, output: OutputManager) -> CliResult<()> {
    if !args.path.is_dir() {
        return Err(CliError::FileNotFound {
            path: args.path.clone(),
        });
    }

    let mut violations = Vec::new();
    violations.extend(check_leftover_tokens(&args.path));
    let tracked_type = check_tracking_metadata(&args.path, &mut violations);
    violations.extend(check_workflows(&args.path));
    if let Some(project_type) = tracked_type {
        violations.extend(check_type_consistency(&args.path, project_type));
    }

    if violations.is_empty() {
        output.success(&format!("{} looks good", args.path.display()))?;
        Ok(())
    } else {
        for violation in &violations {
            output.error(violation)?;
        }
        Err(CliError::CheckFailed { violations })
    }
}

// ── Checks ────────────────────────────────────────────────────────────────────

/// Scan every text file for `__NAME__` placeholders that survived generation.
fn check_leftover_tokens(root: &Path) -> Vec<String> {
    let mut violations = Vec::new();

    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        entry
            .file_name()
            .to_str()
            .map(|name| !SKIPPED_DIRS.contains(&name))
            .unwrap_or(true)
    });

    for entry in walker.filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        // Binary files fail UTF-8 decoding and are skipped.
        let Ok(content) = std::fs::read_to_string(entry.path()) else {
            continue;
        };
        for token in TokenMap::remaining(&content) {
            violations.push(format!(
                "{}: placeholder token '{}' was not substituted",
                entry.path().display(),
                token
            ));
        }
    }

    debug!(count = violations.len(), "token scan finished");
    violations
}

/// Validate `.cruft.json`; returns the recorded project type when readable.
fn check_tracking_metadata(root: &Path, violations: &mut Vec<String>) -> Option<ProjectType> {
    let cruft_path = root.join(CRUFT_FILE);
    let raw = match std::fs::read_to_string(&cruft_path) {
        Ok(raw) => raw,
        Err(_) => {
            violations.push(format!("{}: missing", cruft_path.display()));
            return None;
        }
    };

    match CruftMetadata::from_json(&raw) {
        Ok(meta) => {
            // `CommitHash` enforces the 40-hex shape at parse time, so a
            // deserialised commit is valid by construction; only absence
            // can be wrong here.
            if !meta.is_tracked() {
                violations.push(format!("{}: commit field is null", cruft_path.display()));
            }
            Some(meta.context.project_type())
        }
        Err(e) => {
            violations.push(format!("{}: {e}", cruft_path.display()));
            None
        }
    }
}

/// Every workflow file must be parseable YAML.
fn check_workflows(root: &Path) -> Vec<String> {
    let workflows_dir = root.join(".github").join("workflows");
    let Ok(entries) = std::fs::read_dir(&workflows_dir) else {
        // No workflows directory is a violation only via type consistency,
        // not here: a minimal project may legitimately drop CI.
        return Vec::new();
    };

    let mut violations = Vec::new();
    let mut paths: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| {
            matches!(
                p.extension().and_then(|e| e.to_str()),
                Some("yml") | Some("yaml")
            )
        })
        .collect();
    paths.sort();

    for path in paths {
        let Ok(content) = std::fs::read_to_string(&path) else {
            violations.push(format!("{}: unreadable", path.display()));
            continue;
        };
        if let Err(e) = serde_yaml::from_str::<serde_yaml::Value>(&content) {
            violations.push(format!("{}: invalid YAML: {e}", path.display()));
        }
    }
    violations
}

/// Paper projects carry the paper workflow; standard projects must not.
fn check_type_consistency(root: &Path, project_type: ProjectType) -> Vec<String> {
    let paper_dir = root.join("paper");
    match project_type {
        ProjectType::Paper => {
            let mut violations = Vec::new();
            for required in ["paper.md", "references.bib", "Makefile"] {
                if !paper_dir.join(required).is_file() {
                    violations.push(format!(
                        "paper project is missing paper/{required}"
                    ));
                }
            }
            violations
        }
        ProjectType::Standard => {
            if paper_dir.exists() {
                vec!["standard project contains a paper/ directory".to_string()]
            } else {
                Vec::new()
            }
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
