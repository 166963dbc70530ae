//! Exit-code and error-surface tests for pyscaf-cli.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pyscaf() -> Command {
    Command::cargo_bin("pyscaf").unwrap()
}

#[test]
fn no_arguments_shows_help_and_fails() {
    pyscaf()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn unknown_subcommand_is_rejected() {
    pyscaf().arg("frobnicate").assert().failure().code(2);
}

#[test]
fn dotfile_project_name_is_rejected() {
    let temp = TempDir::new().unwrap();

    pyscaf()
        .current_dir(temp.path())
        .args(["new", ".hidden", "--yes"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid project name"));
}

#[test]
fn invalid_python_min_is_user_error() {
    let temp = TempDir::new().unwrap();

    pyscaf()
        .current_dir(temp.path())
        .args(["new", "demo", "--python-min", "latest", "--yes"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn too_old_python_min_is_user_error() {
    let temp = TempDir::new().unwrap();

    pyscaf()
        .current_dir(temp.path())
        .args(["new", "demo", "--python-min", "3.6", "--yes"])
        .assert()
        .failure()
        .code(2);

    assert!(!temp.path().join("demo").exists());
}

#[test]
fn bump_without_pyproject_is_not_found() {
    let temp = TempDir::new().unwrap();

    pyscaf()
        .current_dir(temp.path())
        .args(["bump", "--to", "3.12"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("pyproject.toml"));
}

#[test]
fn bump_with_bad_version_is_user_error() {
    pyscaf()
        .args(["bump", "--to", "three"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn check_on_missing_directory_is_not_found() {
    pyscaf()
        .args(["check", "--path", "/definitely/not/here"])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn invalid_project_type_is_rejected_by_clap() {
    pyscaf()
        .args(["new", "demo", "--type", "thesis"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn errors_include_suggestions() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join("taken")).unwrap();

    pyscaf()
        .current_dir(temp.path())
        .args(["new", "taken", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Suggestions:"))
        .stderr(predicate::str::contains("--force"));
}
