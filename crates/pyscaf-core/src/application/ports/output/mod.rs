//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `pyscaf-adapters` crate provides implementations.

use crate::domain::{
    Blueprint, ProjectParams, ProjectStructure, PythonVersion, RenderContext, TokenMap,
};
use crate::error::PyscafResult;
use std::path::Path;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `pyscaf_adapters::filesystem::LocalFilesystem` (production)
/// - `pyscaf_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Generated paths are always relative to a chosen root
/// - Permissions are capability-based, not Unix-specific
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> PyscafResult<()>;

    /// Write content to a file.
    fn write_file(&self, path: &Path, content: &str) -> PyscafResult<()>;

    /// Read a file's content.
    fn read_file(&self, path: &Path) -> PyscafResult<String>;

    /// Set file permissions.
    fn set_permissions(&self, path: &Path, executable: bool) -> PyscafResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> PyscafResult<()>;
}

/// Captured result of an external command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Convenience constructor for test doubles.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Port for external command execution.
///
/// Implemented by:
/// - `pyscaf_adapters::process::SystemProcessRunner` (production)
/// - `pyscaf_adapters::process::ScriptedRunner` (testing)
///
/// The `Err` branch means the command could not be *started* (binary missing,
/// spawn failure). A command that ran and exited non-zero is `Ok` with
/// `success == false` — callers decide whether that matters.
pub trait ProcessRunner: Send + Sync {
    fn run(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> PyscafResult<CommandOutput>;
}

/// One Python release cycle as reported by the release-metadata service.
#[derive(Debug, Clone)]
pub struct ReleaseCycle {
    pub version: PythonVersion,
    /// Whether the cycle has reached end-of-life.
    pub eol: bool,
}

/// Port for remote Python release metadata.
///
/// Implemented by:
/// - `pyscaf_adapters::release_feed::EndOfLifeFeed` (production)
/// - `pyscaf_adapters::release_feed::StaticFeed` (testing)
pub trait ReleaseFeed: Send + Sync {
    /// All known Python release cycles, newest first or oldest first — the
    /// caller sorts. Errors when the service is unreachable or unparsable.
    fn python_cycles(&self) -> PyscafResult<Vec<ReleaseCycle>>;
}

/// Port for blueprint rendering.
///
/// Implemented by:
/// - `pyscaf_adapters::renderer::TokenRenderer`
pub trait BlueprintRenderer: Send + Sync {
    /// Render a blueprint into a concrete project structure.
    ///
    /// # Arguments
    ///
    /// * `blueprint` - The conditional file tree
    /// * `params` - Validated generation parameters (select nodes)
    /// * `context` - `{{VAR}}` substitution context
    /// * `tokens` - `__TOKEN__` substitution map
    /// * `output_root` - Root directory for output paths
    fn render(
        &self,
        blueprint: &Blueprint,
        params: &ProjectParams,
        context: &RenderContext,
        tokens: &TokenMap,
        output_root: &Path,
    ) -> PyscafResult<ProjectStructure>;
}
