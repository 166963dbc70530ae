//! Application layer for Pyscaf.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerateService, VersionDiscovery,
//!   CommitResolver, PostGenRunner)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    COMMIT_OVERRIDE_ENV, CommitResolver, GenerateReport, GenerateService, PostGenReport,
    PostGenRunner, PostGenStep, StepOutcome, VersionDiscovery, synthetic_commit,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    BlueprintRenderer, CommandOutput, Filesystem, ProcessRunner, ReleaseCycle, ReleaseFeed,
};

pub use error::ApplicationError;
