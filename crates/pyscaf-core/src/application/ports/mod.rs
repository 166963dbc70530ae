//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `pyscaf-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `ProcessRunner`: External command execution (git, uv, pre-commit)
//!   - `ReleaseFeed`: Remote Python release metadata
//!   - `BlueprintRenderer`: Blueprint → project structure rendering
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{BlueprintRenderer, CommandOutput, Filesystem, ProcessRunner, ReleaseCycle, ReleaseFeed};
