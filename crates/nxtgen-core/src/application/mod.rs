//! Application layer for nxtgen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService, Installer, FileMutator)
//! - **Feature contract**: the `Feature` trait feature modules implement
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod feature;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main services
pub use services::{
    FeatureInfo, FileMutation, FileMutator, InstallBatches, InstallReport, Installer,
    ScaffoldOptions, ScaffoldPreview, ScaffoldReport, ScaffoldRequest, ScaffoldService,
};

pub use feature::{ApplyLog, Feature, FeatureContext, MutationRecord};

// Re-export port traits (for adapter implementation)
pub use ports::{CommandRunner, Filesystem, ScaffoldObserver, SilentObserver};

pub use error::ApplicationError;
