//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish high-level
//! use cases like "generate a project" or "resolve the tracking commit".

pub mod commit_resolver;
pub mod generate_service;
pub mod post_gen;
pub mod version_discovery;

pub use commit_resolver::{COMMIT_OVERRIDE_ENV, CommitResolver, synthetic_commit};
pub use generate_service::{GenerateReport, GenerateService};
pub use post_gen::{PostGenReport, PostGenRunner, PostGenStep, StepOutcome};
pub use version_discovery::{DEFAULT_VERSIONS, VersionDiscovery};
