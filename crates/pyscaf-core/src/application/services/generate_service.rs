//! Generate Service - main application orchestrator.
//!
//! This service coordinates the entire generation workflow:
//! 1. Validate blueprint and parameters
//! 2. Discover the Python version matrix
//! 3. Render the blueprint with context + tokens
//! 4. Write to filesystem (rollback on failure)
//! 5. Write `.cruft.json` tracking metadata (write-once)
//! 6. Run post-generation steps (git, hooks, initial commit)
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::path::{Path, PathBuf};

use chrono::Datelike;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{BlueprintRenderer, Filesystem, ProcessRunner, ReleaseFeed},
        services::commit_resolver::CommitResolver,
        services::post_gen::{PostGenReport, PostGenRunner},
        services::version_discovery::VersionDiscovery,
    },
    domain::{
        Blueprint, CRUFT_FILE, CommitHash, CruftMetadata, DomainValidator, ProjectParams,
        ProjectStructure, RenderContext, TokenMap, VersionMatrix,
    },
    error::{PyscafError, PyscafResult},
};

/// Mypy pre-commit hook block, dropped when type-checking is toggled off.
const MYPY_REPO_BLOCK: &str = "  - repo: https://github.com/pre-commit/mirrors-mypy\n    rev: v1.14.1\n    hooks:\n      - id: mypy\n        additional_dependencies: []\n";

/// What a generation run produced.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub project_path: PathBuf,
    pub matrix: VersionMatrix,
    pub commit: CommitHash,
    pub post_gen: PostGenReport,
    /// `true` when an existing `.cruft.json` with a resolved commit was
    /// preserved instead of rewritten (the write-once invariant).
    pub cruft_preserved: bool,
}

/// Main generation service.
///
/// Orchestrates version discovery, rendering, writing, tracking, and
/// post-generation initialization.
pub struct GenerateService {
    renderer: Box<dyn BlueprintRenderer>,
    filesystem: Box<dyn Filesystem>,
    runner: Box<dyn ProcessRunner>,
    feed: Box<dyn ReleaseFeed>,
}

impl GenerateService {
    /// Create a new generate service with the given adapters.
    pub fn new(
        renderer: Box<dyn BlueprintRenderer>,
        filesystem: Box<dyn Filesystem>,
        runner: Box<dyn ProcessRunner>,
        feed: Box<dyn ReleaseFeed>,
    ) -> Self {
        Self {
            renderer,
            filesystem,
            runner,
            feed,
        }
    }

    /// Generate a project at `project_path`.
    ///
    /// This is the main use case. `force` allows overwriting an existing
    /// directory; even then, an existing tracked `.cruft.json` survives
    /// byte-for-byte.
    #[instrument(
        skip_all,
        fields(
            project = %params.repo_name(),
            path = %project_path.as_ref().display(),
        )
    )]
    pub fn generate(
        &self,
        blueprint: &Blueprint,
        params: &ProjectParams,
        project_path: impl AsRef<Path>,
        force: bool,
    ) -> PyscafResult<GenerateReport> {
        let project_path = project_path.as_ref();
        info!(
            "Generating {} project '{}'",
            params.project_type(),
            params.repo_name()
        );

        // 1. Validate blueprint
        DomainValidator::validate_blueprint(blueprint).map_err(PyscafError::Domain)?;

        // 2. Version matrix: discovered versions, with the requested minimum
        //    pinned in.
        let discovery = VersionDiscovery::new(self.runner.as_ref(), self.feed.as_ref());
        let matrix = discovery
            .discover(params.python_min())
            .including(params.python_min());
        info!(matrix = %matrix.matrix_json(), "version matrix resolved");

        // 3. Substitution inputs
        let context = build_context(params);
        let tokens = TokenMap::standard(&matrix, chrono::Utc::now().year());

        // 4. Render
        let structure = self
            .renderer
            .render(blueprint, params, &context, &tokens, project_path)?;
        DomainValidator::validate_structure(&structure).map_err(PyscafError::Domain)?;
        DomainValidator::validate_no_leftover_tokens(&structure).map_err(PyscafError::Domain)?;
        debug!(entries = structure.entry_count(), "blueprint rendered");

        // 5. Preserve existing tracking metadata before any destructive step.
        let preserved = self.existing_tracked_cruft(project_path);

        // 6. Occupancy check
        if self.filesystem.exists(project_path) {
            if !force {
                return Err(ApplicationError::ProjectExists {
                    path: project_path.to_path_buf(),
                }
                .into());
            }
            warn!("overwriting existing directory (--force)");
            self.filesystem.remove_dir_all(project_path)?;
        }

        // 7. Write, rolling back the partial tree on failure.
        self.write_structure(&structure)?;

        // 8. Tracking metadata. Resolution only runs when there is nothing
        //    to preserve — a preserved commit is frozen.
        let (cruft, cruft_preserved) = match preserved {
            Some(existing) => (existing, true),
            None => {
                let resolver = CommitResolver::new(self.runner.as_ref(), self.filesystem.as_ref());
                let commit = resolver.resolve(&blueprint.source);
                let meta = CruftMetadata::new(blueprint.source.identifier(), params.clone())
                    .with_commit(commit);
                (meta, false)
            }
        };
        let commit = cruft.commit.clone().expect("cruft is tracked at this point");
        self.filesystem.write_file(
            &project_path.join(CRUFT_FILE),
            &cruft.to_json().map_err(PyscafError::Domain)?,
        )?;

        // 9. Post-generation steps (best-effort, never fatal).
        let post_gen = PostGenRunner::new(self.runner.as_ref()).run(project_path);

        info!(commit = commit.short(), "generation completed");
        Ok(GenerateReport {
            project_path: project_path.to_path_buf(),
            matrix,
            commit,
            post_gen,
            cruft_preserved,
        })
    }

    /// Render without writing anything — backs `--dry-run`.
    pub fn preview(
        &self,
        blueprint: &Blueprint,
        params: &ProjectParams,
        project_path: impl AsRef<Path>,
    ) -> PyscafResult<ProjectStructure> {
        DomainValidator::validate_blueprint(blueprint).map_err(PyscafError::Domain)?;

        let discovery = VersionDiscovery::new(self.runner.as_ref(), self.feed.as_ref());
        let matrix = discovery
            .discover(params.python_min())
            .including(params.python_min());
        let context = build_context(params);
        let tokens = TokenMap::standard(&matrix, chrono::Utc::now().year());

        let structure =
            self.renderer
                .render(blueprint, params, &context, &tokens, project_path.as_ref())?;
        DomainValidator::validate_structure(&structure).map_err(PyscafError::Domain)?;
        DomainValidator::validate_no_leftover_tokens(&structure).map_err(PyscafError::Domain)?;
        Ok(structure)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// An existing `.cruft.json` with a resolved commit, if any.
    ///
    /// Unreadable or untracked documents are treated as absent: generation
    /// proceeds and writes a fresh one.
    fn existing_tracked_cruft(&self, project_path: &Path) -> Option<CruftMetadata> {
        let cruft_path = project_path.join(CRUFT_FILE);
        if !self.filesystem.exists(&cruft_path) {
            return None;
        }
        match self
            .filesystem
            .read_file(&cruft_path)
            .ok()
            .and_then(|raw| CruftMetadata::from_json(&raw).ok())
        {
            Some(existing) if existing.is_tracked() => {
                info!("existing tracking metadata found; commit will be preserved");
                Some(existing)
            }
            _ => {
                warn!("existing {CRUFT_FILE} is untracked or malformed; regenerating");
                None
            }
        }
    }

    /// Write project structure to filesystem with rollback on failure.
    fn write_structure(&self, structure: &ProjectStructure) -> PyscafResult<()> {
        match self.write_all(structure) {
            Ok(()) => {
                info!("Successfully wrote all files");
                Ok(())
            }
            Err(e) => {
                warn!("Write failed, attempting rollback");
                self.rollback(structure.root());
                Err(e)
            }
        }
    }

    /// Write all entries in the structure.
    fn write_all(&self, structure: &ProjectStructure) -> PyscafResult<()> {
        // Create root
        self.filesystem.create_dir_all(structure.root())?;

        // Write entries
        for entry in structure.entries() {
            match entry {
                crate::domain::FsEntry::Directory(dir) => {
                    let path = structure.root().join(&dir.path);
                    self.filesystem.create_dir_all(&path)?;
                }
                crate::domain::FsEntry::File(file) => {
                    let path = structure.root().join(&file.path);

                    // Ensure parent exists
                    if let Some(parent) = path.parent() {
                        self.filesystem.create_dir_all(parent)?;
                    }

                    self.filesystem.write_file(&path, &file.content)?;

                    if file.permissions.executable_flag() {
                        self.filesystem.set_permissions(&path, true)?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(
                error = %e,
                path = %root.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }
}

/// The `{{VAR}}` context for one generation run.
fn build_context(params: &ProjectParams) -> RenderContext {
    let mypy_block = if params.skip_typecheck() {
        ""
    } else {
        MYPY_REPO_BLOCK
    };

    RenderContext::new()
        .with_variable("PROJECT_NAME", params.project_name())
        .with_variable("REPO_NAME", params.repo_name())
        .with_variable("PACKAGE_NAME", params.package_name())
        .with_variable("AUTHOR", params.author())
        .with_variable("DESCRIPTION", params.description())
        .with_variable("MYPY_REPOS", mypy_block)
}
