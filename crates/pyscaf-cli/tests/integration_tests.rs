//! Integration tests for pyscaf-cli.
//!
//! These drive the real binary. Generation runs fully offline: missing
//! git/uv and an unreachable release feed all degrade by design, so the
//! assertions only rely on guaranteed behavior.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn pyscaf() -> Command {
    Command::cargo_bin("pyscaf").unwrap()
}

/// Generation shells out to git/uv/pre-commit, all best-effort. Emptying
/// PATH makes every subprocess fail deterministically (and keeps the test
/// from installing anything for real), which generation must survive.
fn pyscaf_hermetic() -> Command {
    let mut cmd = pyscaf();
    cmd.env("PATH", "");
    cmd
}

#[test]
fn help_flag() {
    pyscaf()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("versions"));
}

#[test]
fn version_flag() {
    pyscaf()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn new_command_help() {
    pyscaf()
        .args(["new", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--python-min"))
        .stdout(predicate::str::contains("--type"))
        .stdout(predicate::str::contains("--assistant"));
}

#[test]
fn new_project_success() {
    let temp = TempDir::new().unwrap();

    pyscaf_hermetic()
        .current_dir(temp.path())
        .args(["new", "test-project", "--yes"])
        .assert()
        .success();

    let project = temp.path().join("test-project");
    assert!(project.exists());
    assert!(project.join("pyproject.toml").exists());
    assert!(project.join("src/test_project/__init__.py").exists());
    assert!(project.join("tests/test_sample.py").exists());
    assert!(project.join(".github/workflows/ci.yml").exists());
}

#[test]
fn generated_cruft_has_full_sha() {
    let temp = TempDir::new().unwrap();

    pyscaf_hermetic()
        .current_dir(temp.path())
        .args(["new", "test-project", "--yes"])
        .assert()
        .success();

    let raw = fs::read_to_string(temp.path().join("test-project/.cruft.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let commit = doc["commit"].as_str().expect("commit must be a string");
    assert_eq!(commit.len(), 40);
    assert!(commit.chars().all(|c| c.is_ascii_hexdigit()));
    assert!(doc["template"].is_string());
    assert!(doc["context"].is_object());
}

#[test]
fn second_run_with_force_preserves_cruft() {
    let temp = TempDir::new().unwrap();

    pyscaf_hermetic()
        .current_dir(temp.path())
        .args(["new", "test-project", "--yes"])
        .assert()
        .success();
    let first = fs::read_to_string(temp.path().join("test-project/.cruft.json")).unwrap();

    pyscaf_hermetic()
        .current_dir(temp.path())
        .args(["new", "test-project", "--yes", "--force"])
        .assert()
        .success();
    let second = fs::read_to_string(temp.path().join("test-project/.cruft.json")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn new_project_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();

    pyscaf_hermetic()
        .current_dir(temp.path())
        .args(["new", "test-project", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(!temp.path().join("test-project").exists());
}

#[test]
fn new_project_already_exists() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("existing-project")).unwrap();

    pyscaf_hermetic()
        .current_dir(temp.path())
        .args(["new", "existing-project", "--yes"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn paper_type_emits_paper_files() {
    let temp = TempDir::new().unwrap();

    pyscaf_hermetic()
        .current_dir(temp.path())
        .args(["new", "paper-project", "--type", "paper", "--yes"])
        .assert()
        .success();

    let project = temp.path().join("paper-project");
    assert!(project.join("paper/paper.md").exists());
    assert!(project.join("paper/references.bib").exists());
    assert!(project.join(".github/workflows/paper.yml").exists());
}

#[test]
fn standard_type_has_no_paper_files() {
    let temp = TempDir::new().unwrap();

    pyscaf_hermetic()
        .current_dir(temp.path())
        .args(["new", "std-project", "--yes"])
        .assert()
        .success();

    assert!(!temp.path().join("std-project/paper").exists());
}

#[test]
fn assistant_files_follow_selection() {
    let temp = TempDir::new().unwrap();

    pyscaf_hermetic()
        .current_dir(temp.path())
        .args([
            "new",
            "ai-project",
            "--assistant",
            "claude",
            "--assistant",
            "copilot",
            "--yes",
        ])
        .assert()
        .success();

    let project = temp.path().join("ai-project");
    assert!(project.join("CLAUDE.md").exists());
    assert!(project.join(".github/copilot-instructions.md").exists());
    assert!(!project.join(".cursorrules").exists());
}

#[test]
fn check_passes_on_generated_project() {
    let temp = TempDir::new().unwrap();

    pyscaf_hermetic()
        .current_dir(temp.path())
        .args(["new", "good-project", "--yes"])
        .assert()
        .success();

    pyscaf()
        .current_dir(temp.path())
        .args(["check", "--path", "good-project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("looks good"));
}

#[test]
fn check_flags_leftover_tokens() {
    let temp = TempDir::new().unwrap();

    pyscaf_hermetic()
        .current_dir(temp.path())
        .args(["new", "bad-project", "--yes"])
        .assert()
        .success();

    // Sabotage: reintroduce an unsubstituted placeholder.
    let readme = temp.path().join("bad-project/README.md");
    fs::write(&readme, "Requires Python __PY_MIN__+\n").unwrap();

    pyscaf()
        .current_dir(temp.path())
        .args(["check", "--path", "bad-project"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("__PY_MIN__"));
}

#[test]
fn bump_rewrites_requires_python() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("pyproject.toml"),
        "[project]\nname = \"demo\"\nrequires-python = \">=3.10,<3.13\"\n",
    )
    .unwrap();

    pyscaf()
        .current_dir(temp.path())
        .args(["bump", "--to", "3.12"])
        .assert()
        .success();

    let updated = fs::read_to_string(temp.path().join("pyproject.toml")).unwrap();
    assert!(updated.contains(">=3.12,<3.13"));
}

#[test]
fn versions_json_has_bounds_and_matrix() {
    pyscaf()
        .args(["versions", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"bounds\""))
        .stdout(predicate::str::contains("\"matrix\""));
}

#[test]
fn quiet_new_produces_no_stdout() {
    let temp = TempDir::new().unwrap();

    pyscaf_hermetic()
        .current_dir(temp.path())
        .args(["-q", "new", "quiet-project", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(temp.path().join("quiet-project").exists());
}

#[test]
fn shell_completions() {
    pyscaf()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pyscaf"));
}
