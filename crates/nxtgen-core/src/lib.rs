//! nxtgen core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the nxtgen
//! Next.js scaffolding tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           nxtgen-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ScaffoldService, Installer, Mutator)  │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, CommandRunner, Observer)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    nxtgen-adapters (Infrastructure)     │
//! │  (LocalFilesystem, SystemCommandRunner, │
//! │          built-in features)             │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (DependencyCollector, source mutations) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nxtgen_core::prelude::*;
//!
//! # fn run(fs: Box<dyn Filesystem>, runner: Box<dyn CommandRunner>, features: Vec<Box<dyn Feature>>) -> NxtgenResult<()> {
//! let request = ScaffoldRequest::new(
//!     ProjectName::parse("my-app")?,
//!     ".",
//!     ProjectConfig::default(),
//! );
//! let service = ScaffoldService::new(fs, runner, features);
//! let report = service.scaffold(&request)?;
//! println!("created {}", report.directory.display());
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CommandRunner, Feature, FeatureContext, Filesystem, ScaffoldObserver, ScaffoldOptions,
        ScaffoldReport, ScaffoldRequest, ScaffoldService,
    };
    pub use crate::domain::{
        AuthProvider, DependencyCollector, ExampleSet, License, Orm, PackageManager,
        ProjectConfig, ProjectName, ScaffoldPlan, UiKit,
    };
    pub use crate::error::{NxtgenError, NxtgenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
