//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the outside world
//! (filesystem, child processes). Business rule violations are `DomainError`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// The program could not be started at all (not on PATH, not executable).
    #[error("Could not run '{program}': {reason}")]
    CommandSpawnFailed { program: String, reason: String },

    /// The program ran and exited unsuccessfully.
    #[error("Command failed ({status}): {command}")]
    CommandFailed { command: String, status: String },

    /// Dependency installation failed; nothing after it was run.
    #[error("Installing dependencies with {package_manager} failed: {reason}")]
    InstallFailed {
        dir: PathBuf,
        package_manager: String,
        reason: String,
        /// The failed command followed by every command it prevented.
        remaining: Vec<String>,
    },

    /// A generated file could not be tokenized, so it was left untouched.
    #[error("Could not update {path} (line {line}, column {column}): {reason}")]
    MutationFailed {
        path: PathBuf,
        line: usize,
        column: usize,
        reason: String,
    },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name or remove the directory".into(),
            ],
            Self::CommandSpawnFailed { program, .. } => vec![
                format!("Make sure '{program}' is installed and on your PATH"),
                "Node.js 18.18 or later is required by Next.js".into(),
            ],
            Self::CommandFailed { .. } => vec![
                "Check the command output above".into(),
                "Re-run with -v for more detail".into(),
            ],
            Self::InstallFailed { dir, remaining, .. } => {
                let mut steps = vec![
                    "The project files were generated; finish the setup by hand:".into(),
                    format!("cd {}", dir.display()),
                ];
                steps.extend(remaining.iter().cloned());
                steps
            }
            Self::MutationFailed { path, .. } => vec![
                format!("{} is not valid JavaScript/TypeScript", path.display()),
                "Fix the file by hand; nothing was written to it".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::CommandSpawnFailed { .. } => ErrorCategory::NotFound,
            Self::FilesystemError { .. }
            | Self::CommandFailed { .. }
            | Self::InstallFailed { .. }
            | Self::MutationFailed { .. } => ErrorCategory::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_failure_prints_recovery_steps() {
        let err = ApplicationError::InstallFailed {
            dir: PathBuf::from("/work/my-app"),
            package_manager: "pnpm".into(),
            reason: "exit status: 1".into(),
            remaining: vec![
                "pnpm add -D prisma".into(),
                "pnpm dlx prisma generate".into(),
            ],
        };
        let suggestions = err.suggestions();
        let cd = suggestions.iter().position(|s| s == "cd /work/my-app").unwrap();
        assert_eq!(
            suggestions[cd + 1..],
            ["pnpm add -D prisma", "pnpm dlx prisma generate"]
        );
    }
}
