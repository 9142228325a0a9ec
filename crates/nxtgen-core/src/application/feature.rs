//! The feature module contract.
//!
//! A feature runs in two phases. `register` adds packages and post-install
//! steps to the shared [`ScaffoldPlan`] without touching the disk, so a dry
//! run can show the full install plan. `apply` runs after the generator has
//! produced the base project and writes templates or mutates files through
//! [`FeatureContext`].

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    application::{
        ports::{Filesystem, ScaffoldObserver},
        services::file_mutators::{FileMutation, FileMutator},
    },
    domain::{
        MutationOutcome, PackageManager, ProjectConfig, ProjectName, ScaffoldPlan, SkipReason,
        StylePlugin, WrapperComponent,
    },
    error::NxtgenResult,
};

pub trait Feature: Send + Sync {
    /// Stable identifier, e.g. `data-layer`.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn is_enabled(&self, config: &ProjectConfig) -> bool;

    fn register(&self, _config: &ProjectConfig, _plan: &mut ScaffoldPlan) {}

    fn apply(&self, ctx: &mut FeatureContext<'_>) -> NxtgenResult<()>;
}

/// A mutation performed by a feature, for the final report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationRecord {
    pub feature: &'static str,
    #[serde(flatten)]
    pub mutation: FileMutation,
}

/// What the features did to the project directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyLog {
    pub files_written: Vec<PathBuf>,
    pub files_removed: Vec<PathBuf>,
    pub mutations: Vec<MutationRecord>,
    pub warnings: Vec<String>,
}

/// Everything a feature may read or touch while applying.
pub struct FeatureContext<'a> {
    root: &'a Path,
    project: &'a ProjectName,
    config: &'a ProjectConfig,
    package_manager: PackageManager,
    license_holder: Option<&'a str>,
    filesystem: &'a dyn Filesystem,
    observer: &'a dyn ScaffoldObserver,
    feature: &'static str,
    log: ApplyLog,
}

impl<'a> FeatureContext<'a> {
    pub fn new(
        root: &'a Path,
        project: &'a ProjectName,
        config: &'a ProjectConfig,
        package_manager: PackageManager,
        filesystem: &'a dyn Filesystem,
        observer: &'a dyn ScaffoldObserver,
    ) -> Self {
        Self {
            root,
            project,
            config,
            package_manager,
            license_holder: None,
            filesystem,
            observer,
            feature: "",
            log: ApplyLog::default(),
        }
    }

    pub fn with_license_holder(mut self, holder: Option<&'a str>) -> Self {
        self.license_holder = holder;
        self
    }

    pub(crate) fn enter(&mut self, feature: &'static str) {
        self.feature = feature;
    }

    pub fn into_log(self) -> ApplyLog {
        self.log
    }

    pub fn log(&self) -> &ApplyLog {
        &self.log
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn root(&self) -> &Path {
        self.root
    }

    pub fn project(&self) -> &'a ProjectName {
        self.project
    }

    pub fn config(&self) -> &'a ProjectConfig {
        self.config
    }

    pub fn package_manager(&self) -> PackageManager {
        self.package_manager
    }

    /// Copyright holder for generated license files.
    pub fn license_holder(&self) -> Option<&'a str> {
        self.license_holder
    }

    // ── Files ────────────────────────────────────────────────────────────

    pub fn exists(&self, rel: impl AsRef<Path>) -> bool {
        self.filesystem.exists(&self.root.join(rel))
    }

    pub fn read(&self, rel: impl AsRef<Path>) -> NxtgenResult<String> {
        self.filesystem.read_to_string(&self.root.join(rel))
    }

    /// Write a project file, creating parent directories.
    pub fn write(&mut self, rel: impl AsRef<Path>, content: &str) -> NxtgenResult<()> {
        let rel = rel.as_ref();
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(&path, content)?;
        debug!(feature = self.feature, path = %rel.display(), "Wrote file");
        self.log.files_written.push(rel.to_path_buf());
        Ok(())
    }

    pub fn write_executable(&mut self, rel: impl AsRef<Path>, content: &str) -> NxtgenResult<()> {
        let rel = rel.as_ref();
        self.write(rel, content)?;
        self.filesystem.set_permissions(&self.root.join(rel), true)
    }

    /// Remove a project file if it exists.
    pub fn remove(&mut self, rel: impl AsRef<Path>) -> NxtgenResult<()> {
        let rel = rel.as_ref();
        let path = self.root.join(rel);
        if self.filesystem.exists(&path) {
            self.filesystem.remove_file(&path)?;
            self.log.files_removed.push(rel.to_path_buf());
        }
        Ok(())
    }

    // ── Mutations ────────────────────────────────────────────────────────

    pub fn wrap_layout(&mut self, wrapper: &WrapperComponent) -> NxtgenResult<MutationOutcome> {
        let result = self.mutator().wrap_layout_children(wrapper)?;
        Ok(self.record(result))
    }

    pub fn register_style_plugin(&mut self, plugin: &StylePlugin) -> NxtgenResult<MutationOutcome> {
        let result = self.mutator().register_style_plugin(plugin)?;
        Ok(self.record(result))
    }

    pub fn ensure_global_css_block(
        &mut self,
        block: &str,
        marker: &str,
        anchors: &[&str],
    ) -> NxtgenResult<MutationOutcome> {
        let result = self
            .mutator()
            .ensure_global_css_block(block, marker, anchors)?;
        Ok(self.record(result))
    }

    pub fn add_scripts(&mut self, scripts: &[(&str, &str)]) -> NxtgenResult<MutationOutcome> {
        let result = self.mutator().add_package_scripts(scripts)?;
        Ok(self.record(result))
    }

    /// First existing candidate path, relative to the project root.
    pub fn locate(&self, candidates: &[&str]) -> Option<PathBuf> {
        self.mutator().locate(candidates)
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(feature = self.feature, "{message}");
        self.observer.warning(&message);
        self.log.warnings.push(message);
    }

    fn mutator(&self) -> FileMutator<'_> {
        FileMutator::new(self.filesystem, self.root)
    }

    fn record(&mut self, mutation: FileMutation) -> MutationOutcome {
        let outcome = mutation.outcome.clone();
        // A missing target is a silent no-op.
        let attention = outcome
            .attention()
            .filter(|reason| *reason != SkipReason::FileMissing);
        if let (Some(reason), Some(path)) = (attention, mutation.path.as_deref()) {
            self.warn(format!("{}: {}: {reason}", self.feature, path.display()));
        }
        self.log.mutations.push(MutationRecord {
            feature: self.feature,
            mutation,
        });
        outcome
    }
}
