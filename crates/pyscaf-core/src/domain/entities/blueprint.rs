//! The built-in project blueprint: a conditional file tree.
//!
//! A [`Blueprint`] is a declarative list of files and directories. Each node
//! carries an [`Emit`] condition so one tree serves every parameter
//! combination: paper files only appear for paper projects, assistant
//! instruction files only for selected assistants, and so on. Rendering
//! (variable + token substitution) is an adapter concern; this entity only
//! holds the specs and knows which nodes apply to a given parameter set.

use crate::domain::entities::common::{Permissions, RelativePath};
use crate::domain::entities::params::ProjectParams;
use crate::domain::error::DomainError;
use crate::domain::value_objects::{Assistant, ProjectType, TemplateSource};

/// When a node is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    Always,
    OnlyFor(ProjectType),
    WithAssistant(Assistant),
    WithDocker,
}

impl Emit {
    /// Whether a node with this condition applies to `params`.
    pub fn applies(&self, params: &ProjectParams) -> bool {
        match self {
            Self::Always => true,
            Self::OnlyFor(project_type) => params.project_type() == *project_type,
            Self::WithAssistant(assistant) => params.has_assistant(*assistant),
            Self::WithDocker => params.use_docker(),
        }
    }
}

/// How a file's content is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Emitted byte-for-byte.
    Literal(&'static str),
    /// `{{VAR}}` variables and `__TOKEN__` placeholders are substituted.
    Parameterized(&'static str),
}

impl FileContent {
    pub fn raw(&self) -> &'static str {
        match self {
            Self::Literal(s) | Self::Parameterized(s) => s,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileSpec {
    pub path: RelativePath,
    pub content: FileContent,
    pub permissions: Permissions,
    pub emit: Emit,
}

impl FileSpec {
    pub fn new(path: impl Into<RelativePath>, content: FileContent) -> Self {
        Self {
            path: path.into(),
            content,
            permissions: Permissions::read_write(),
            emit: Emit::Always,
        }
    }

    pub fn emit(mut self, emit: Emit) -> Self {
        self.emit = emit;
        self
    }

    pub fn executable(mut self) -> Self {
        self.permissions = Permissions::executable();
        self
    }
}

#[derive(Debug, Clone)]
pub struct DirectorySpec {
    pub path: RelativePath,
    pub emit: Emit,
}

impl DirectorySpec {
    pub fn new(path: impl Into<RelativePath>) -> Self {
        Self {
            path: path.into(),
            emit: Emit::Always,
        }
    }

    pub fn emit(mut self, emit: Emit) -> Self {
        self.emit = emit;
        self
    }
}

#[derive(Debug, Clone)]
pub enum BlueprintNode {
    File(FileSpec),
    Directory(DirectorySpec),
}

impl BlueprintNode {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }

    pub fn emit_condition(&self) -> Emit {
        match self {
            Self::File(f) => f.emit,
            Self::Directory(d) => d.emit,
        }
    }
}

/// The full conditional tree plus its source identity.
#[derive(Debug, Clone)]
pub struct Blueprint {
    pub name: String,
    pub source: TemplateSource,
    pub nodes: Vec<BlueprintNode>,
}

impl Blueprint {
    pub fn new(name: impl Into<String>, source: TemplateSource) -> Self {
        Self {
            name: name.into(),
            source,
            nodes: Vec::new(),
        }
    }

    pub fn add_file(mut self, spec: FileSpec) -> Self {
        self.nodes.push(BlueprintNode::File(spec));
        self
    }

    pub fn add_directory(mut self, spec: DirectorySpec) -> Self {
        self.nodes.push(BlueprintNode::Directory(spec));
        self
    }

    /// Nodes that apply to the given parameter set, in declaration order.
    pub fn nodes_for<'a>(
        &'a self,
        params: &'a ProjectParams,
    ) -> impl Iterator<Item = &'a BlueprintNode> {
        self.nodes
            .iter()
            .filter(|node| node.emit_condition().applies(params))
    }

    /// Structural validation. Duplicate paths are allowed across mutually
    /// exclusive conditions (a standard and a paper variant of the same
    /// file); the rendered [`super::project_structure::ProjectStructure`]
    /// catches duplicates that actually co-emit.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.nodes.is_empty() {
            return Err(DomainError::EmptyBlueprint {
                name: self.name.clone(),
            });
        }
        for node in &self.nodes {
            if node.path().as_path().is_absolute() {
                return Err(DomainError::AbsolutePathNotAllowed {
                    path: node.path().to_string(),
                });
            }
        }
        Ok(())
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
