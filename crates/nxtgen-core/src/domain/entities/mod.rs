pub mod command;
pub mod dependencies;
pub mod plan;
pub mod project;

pub use crate::domain::DomainError;
pub use command::CommandSpec;
pub use dependencies::{DependencyCollector, DependencySet};
pub use plan::{PostInstallStep, ScaffoldPlan};
pub use project::{ProjectConfig, ProjectName};
