//! Integration tests for pyscaf-core.
//!
//! These exercise `GenerateService` end-to-end against small in-memory port
//! doubles: the full adapter stack is covered in `pyscaf-adapters`' own
//! integration tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use pyscaf_core::application::ports::{
    BlueprintRenderer, CommandOutput, Filesystem, ProcessRunner, ReleaseFeed,
};
use pyscaf_core::application::{ApplicationError, GenerateService};
use pyscaf_core::domain::{
    Blueprint, CRUFT_FILE, CruftMetadata, Emit, FileContent, FileSpec, Permissions, ProjectParams,
    ProjectStructure, ProjectType, PythonVersion, RenderContext, TemplateSource, TokenMap,
};
use pyscaf_core::error::{PyscafError, PyscafResult};

// ── Port doubles ──────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
struct TestFs {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
    dirs: Arc<Mutex<Vec<PathBuf>>>,
}

impl TestFs {
    fn read(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(Path::new(path)).cloned()
    }

    fn file_names(&self) -> Vec<String> {
        self.files
            .lock()
            .unwrap()
            .keys()
            .map(|p| p.display().to_string())
            .collect()
    }
}

impl Filesystem for TestFs {
    fn create_dir_all(&self, path: &Path) -> PyscafResult<()> {
        self.dirs.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
    fn write_file(&self, path: &Path, content: &str) -> PyscafResult<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
    fn read_file(&self, path: &Path) -> PyscafResult<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or(PyscafError::Internal {
                message: format!("no such file: {}", path.display()),
            })
    }
    fn set_permissions(&self, _path: &Path, _executable: bool) -> PyscafResult<()> {
        Ok(())
    }
    fn exists(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        files.keys().any(|p| p.starts_with(path)) || self.dirs.lock().unwrap().contains(&path.to_path_buf())
    }
    fn remove_dir_all(&self, path: &Path) -> PyscafResult<()> {
        self.files.lock().unwrap().retain(|p, _| !p.starts_with(path));
        self.dirs.lock().unwrap().retain(|p| !p.starts_with(path));
        Ok(())
    }
}

/// Runner where git rev-parse answers with a fixed hash and everything else
/// succeeds silently.
struct TestRunner {
    head: String,
    calls: Mutex<Vec<String>>,
}

impl TestRunner {
    fn new(head: &str) -> Self {
        Self {
            head: head.to_string(),
            calls: Mutex::new(vec![]),
        }
    }
}

impl ProcessRunner for TestRunner {
    fn run(&self, program: &str, args: &[&str], _cwd: Option<&Path>) -> PyscafResult<CommandOutput> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{} {}", program, args.join(" ")));
        if program == "git" && args.contains(&"ls-remote") {
            return Ok(CommandOutput::ok(format!("{}\tHEAD\n", self.head)));
        }
        if program == "uv" && args.first() == Some(&"python") {
            return Ok(CommandOutput::ok(
                "cpython-3.11.9-linux-x86_64-gnu /usr/bin/python3.11\n\
                 cpython-3.12.7-linux-x86_64-gnu /usr/bin/python3.12\n",
            ));
        }
        Ok(CommandOutput::ok(""))
    }
}

struct OfflineFeed;

impl ReleaseFeed for OfflineFeed {
    fn python_cycles(&self) -> PyscafResult<Vec<pyscaf_core::application::ReleaseCycle>> {
        Err(PyscafError::Internal {
            message: "offline".into(),
        })
    }
}

/// Minimal renderer: applies context then tokens to parameterized files.
struct TestRenderer;

impl BlueprintRenderer for TestRenderer {
    fn render(
        &self,
        blueprint: &Blueprint,
        params: &ProjectParams,
        context: &RenderContext,
        tokens: &TokenMap,
        output_root: &Path,
    ) -> PyscafResult<ProjectStructure> {
        let mut structure = ProjectStructure::new(output_root);
        for node in blueprint.nodes_for(params) {
            if let pyscaf_core::domain::BlueprintNode::File(spec) = node {
                let content = match &spec.content {
                    FileContent::Literal(s) => (*s).to_string(),
                    FileContent::Parameterized(s) => tokens.apply(&context.render(s)),
                };
                structure.add_file(
                    context.render(spec.path.as_str()),
                    content,
                    Permissions::read_write(),
                );
            }
        }
        Ok(structure)
    }
}

// ── Fixtures ──────────────────────────────────────────────────────────────────

fn blueprint() -> Blueprint {
    Blueprint::new("builtin", TemplateSource::Remote("https://example.com/tpl".into()))
        .add_file(FileSpec::new(
            "pyproject.toml",
            FileContent::Parameterized(
                "[project]\nname = \"{{PACKAGE_NAME}}\"\nrequires-python = \">=__PY_MIN__\"\n",
            ),
        ))
        .add_file(FileSpec::new(
            "README.md",
            FileContent::Parameterized("# {{PROJECT_NAME}}\n\nPython __PY_MIN__+\n"),
        ))
        .add_file(
            FileSpec::new("paper/paper.md", FileContent::Literal("# Paper\n"))
                .emit(Emit::OnlyFor(ProjectType::Paper)),
        )
}

fn params() -> ProjectParams {
    ProjectParams::builder("Demo Project")
        .python_min(PythonVersion::new(3, 11))
        .build()
        .unwrap()
}

fn service(fs: &TestFs, head: &str) -> GenerateService {
    GenerateService::new(
        Box::new(TestRenderer),
        Box::new(fs.clone()),
        Box::new(TestRunner::new(head)),
        Box::new(OfflineFeed),
    )
}

const HEAD_A: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const HEAD_B: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn generation_writes_rendered_files_without_tokens() {
    let fs = TestFs::default();
    let report = service(&fs, HEAD_A)
        .generate(&blueprint(), &params(), "/out/demo-project", false)
        .unwrap();

    let pyproject = fs.read("/out/demo-project/pyproject.toml").unwrap();
    assert!(pyproject.contains("name = \"demo_project\""));
    assert!(pyproject.contains("requires-python = \">=3.11\""));
    assert!(!pyproject.contains("__PY_MIN__"));

    assert_eq!(report.matrix.min(), PythonVersion::new(3, 11));
}

#[test]
fn cruft_commit_is_forty_hex_after_generation() {
    let fs = TestFs::default();
    service(&fs, HEAD_A)
        .generate(&blueprint(), &params(), "/out/demo-project", false)
        .unwrap();

    let raw = fs.read(&format!("/out/demo-project/{CRUFT_FILE}")).unwrap();
    let meta = CruftMetadata::from_json(&raw).unwrap();
    let commit = meta.commit.expect("commit must be set");
    assert_eq!(commit.as_str().len(), 40);
    assert!(commit.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(commit.as_str(), HEAD_A);
}

#[test]
fn second_run_preserves_tracking_commit() {
    let fs = TestFs::default();
    let first = service(&fs, HEAD_A)
        .generate(&blueprint(), &params(), "/out/demo-project", false)
        .unwrap();
    assert!(!first.cruft_preserved);

    // Template HEAD moves between runs; the tracked commit must not.
    let second = service(&fs, HEAD_B)
        .generate(&blueprint(), &params(), "/out/demo-project", true)
        .unwrap();
    assert!(second.cruft_preserved);
    assert_eq!(second.commit.as_str(), HEAD_A);

    let raw = fs.read(&format!("/out/demo-project/{CRUFT_FILE}")).unwrap();
    let meta = CruftMetadata::from_json(&raw).unwrap();
    assert_eq!(meta.commit.unwrap().as_str(), HEAD_A);
}

#[test]
fn existing_directory_without_force_is_rejected() {
    let fs = TestFs::default();
    let svc = service(&fs, HEAD_A);
    svc.generate(&blueprint(), &params(), "/out/demo-project", false)
        .unwrap();

    let result = svc.generate(&blueprint(), &params(), "/out/demo-project", false);
    assert!(matches!(
        result,
        Err(PyscafError::Application(ApplicationError::ProjectExists { .. }))
    ));
}

#[test]
fn standard_run_omits_paper_files() {
    let fs = TestFs::default();
    service(&fs, HEAD_A)
        .generate(&blueprint(), &params(), "/out/demo-project", false)
        .unwrap();

    assert!(
        !fs.file_names()
            .iter()
            .any(|name| name.contains("paper")),
        "paper files must be absent for standard projects"
    );
}

#[test]
fn paper_run_includes_paper_files() {
    let fs = TestFs::default();
    let paper_params = ProjectParams::builder("Demo Project")
        .python_min(PythonVersion::new(3, 11))
        .project_type(ProjectType::Paper)
        .build()
        .unwrap();

    service(&fs, HEAD_A)
        .generate(&blueprint(), &paper_params, "/out/demo-project", false)
        .unwrap();

    assert!(fs.read("/out/demo-project/paper/paper.md").is_some());
}

#[test]
fn preview_writes_nothing() {
    let fs = TestFs::default();
    let structure = service(&fs, HEAD_A)
        .preview(&blueprint(), &params(), "/out/demo-project")
        .unwrap();

    assert!(structure.entry_count() >= 2);
    assert!(fs.file_names().is_empty());
}
