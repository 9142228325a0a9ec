//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a project" or "install dependencies".

pub mod file_mutators;
pub mod installer;
pub mod scaffold_service;

pub use file_mutators::{FileMutation, FileMutator};
pub use installer::{InstallBatches, InstallReport, Installer, StepResult};
pub use scaffold_service::{
    DEFAULT_GENERATOR, DEFAULT_IMPORT_ALIAS, FeatureInfo, ScaffoldOptions, ScaffoldPreview,
    ScaffoldReport, ScaffoldRequest, ScaffoldService,
};
