//! Infrastructure adapters for nxtgen.
//!
//! This crate implements the ports defined in `nxtgen_core::application`:
//! filesystems, process runners, and the built-in feature modules that turn
//! a freshly generated Next.js app into the selected stack.

pub mod features;
pub mod filesystem;
pub mod process;

// Re-export commonly used adapters
pub use features::builtin_features;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{RecordingRunner, SystemCommandRunner};
