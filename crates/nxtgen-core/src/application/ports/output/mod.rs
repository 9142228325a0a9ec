//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `nxtgen-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::CommandSpec;
use crate::error::NxtgenResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `nxtgen_adapters::filesystem::LocalFilesystem` (production)
/// - `nxtgen_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> NxtgenResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> NxtgenResult<()>;

    /// Read a whole UTF-8 file.
    fn read_to_string(&self, path: &Path) -> NxtgenResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> NxtgenResult<()>;

    /// Set file permissions.
    fn set_permissions(&self, path: &Path, executable: bool) -> NxtgenResult<()>;
}

/// Port for running external programs (generator, package manager, dlx tools).
///
/// Calls block until the child exits. Implementations must fail with
/// `ApplicationError::CommandSpawnFailed` when the program cannot be started
/// and `ApplicationError::CommandFailed` on a non-zero exit.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &CommandSpec, cwd: &Path) -> NxtgenResult<()>;
}

/// Progress callbacks for a presentation layer. The core itself never prints.
pub trait ScaffoldObserver: Send + Sync {
    fn step_started(&self, _step: &str) {}

    /// Only called when the step succeeded.
    fn step_finished(&self, _step: &str) {}

    /// An external command is about to take over the terminal.
    fn command_started(&self, _command: &CommandSpec) {}

    fn warning(&self, _message: &str) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl ScaffoldObserver for SilentObserver {}
