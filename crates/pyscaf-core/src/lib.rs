//! Pyscaf Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Pyscaf
//! Python-project generator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           pyscaf-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (GenerateService, VersionDiscovery,     │
//! │  CommitResolver, PostGenRunner)         │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: Filesystem, ProcessRunner,     │
//! │  ReleaseFeed, BlueprintRenderer)        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    pyscaf-adapters (Infrastructure)     │
//! │ (LocalFilesystem, SystemProcessRunner,  │
//! │  EndOfLifeFeed, TokenRenderer)          │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Domain Layer (Pure Logic)         │
//! │ (ProjectParams, Blueprint, TokenMap,    │
//! │  CruftMetadata, PythonVersion)          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pyscaf_core::domain::{ProjectParams, ProjectType};
//!
//! // 1. Build validated parameters
//! let params = ProjectParams::builder("My Project")
//!     .python_min("3.11".parse().unwrap())
//!     .project_type(ProjectType::Standard)
//!     .build()
//!     .unwrap();
//!
//! // 2. Use the generate service (with injected adapters)
//! // let service = GenerateService::new(renderer, filesystem, runner, feed);
//! // service.generate(&blueprint, &params, "./output", false).unwrap();
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CommitResolver, GenerateReport, GenerateService, PostGenReport, VersionDiscovery,
        ports::{BlueprintRenderer, Filesystem, ProcessRunner, ReleaseFeed},
    };
    pub use crate::domain::{
        Assistant, Blueprint, CommitHash, CruftMetadata, ProjectParams, ProjectStructure,
        ProjectType, PythonVersion, RenderContext, TemplateSource, TokenMap, VersionMatrix,
        VersionSpec,
    };
    pub use crate::error::{PyscafError, PyscafResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
