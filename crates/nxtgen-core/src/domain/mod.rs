//! Core domain layer for nxtgen.
//!
//! Pure logic with no I/O: project naming rules, the feature selection,
//! dependency collection, command shapes, and the idempotent source
//! mutations applied to generated files. Filesystem and process access go
//! through the ports defined in the application layer.
//!
//! - **No I/O**: mutators take file text and return new text plus an outcome
//! - **Deterministic**: collectors and plans keep insertion order

pub mod entities;
pub mod error;
pub mod mutation;
pub mod source;
pub mod value_objects;

mod validation;

pub use entities::{
    command::CommandSpec,
    dependencies::{DependencyCollector, DependencySet},
    plan::{PostInstallStep, ScaffoldPlan},
    project::{ProjectConfig, ProjectName},
};

pub use error::{DomainError, ErrorCategory};

pub use mutation::{
    Mutation, MutationOutcome, SkipReason, StylePlugin, WrapperComponent,
};

pub use value_objects::{AuthProvider, ExampleSet, License, Orm, PackageManager, UiKit};

pub use validation::DomainValidator;
