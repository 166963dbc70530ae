//! Infrastructure adapters for Pyscaf.
//!
//! This crate implements the ports defined in `pyscaf_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod blueprint;
pub mod filesystem;
pub mod process;
pub mod release_feed;
pub mod renderer;

// Re-export commonly used adapters
pub use blueprint::builtin_blueprint;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{ScriptedRunner, SystemProcessRunner};
pub use release_feed::{EndOfLifeFeed, StaticFeed};
pub use renderer::TokenRenderer;
