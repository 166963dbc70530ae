//! Core domain layer for Pyscaf.
//!
//! This module contains pure business logic. All I/O — filesystem, process
//! execution, network — is handled via ports (traits) defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable entities**: All domain objects are Clone + PartialEq
//! - **Rich domain model**: Behavior lives in entities, not services

// Public API - what the world sees
pub mod cruft;
pub mod entities;
pub mod error;
pub mod tokens;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use cruft::{CRUFT_FILE, CruftMetadata};

pub use entities::{
    blueprint::{Blueprint, BlueprintNode, DirectorySpec, Emit, FileContent, FileSpec},
    common::{Permissions, RelativePath},
    params::{ParamsBuilder, ProjectParams},
    project_structure::{DirectoryToCreate, FileToWrite, FsEntry, ProjectStructure},
};

pub use error::{DomainError, ErrorCategory};

pub use tokens::{RenderContext, TokenMap, VersionMatrix};

pub use value_objects::{
    Assistant, CommitHash, ProjectType, PythonVersion, TemplateSource, VersionSpec,
};

pub use validation::DomainValidator;
