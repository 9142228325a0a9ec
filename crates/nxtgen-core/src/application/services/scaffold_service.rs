//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Validate the feature selection
//! 2. Let every enabled feature register its packages (the plan)
//! 3. Run the external generator for the base project
//! 4. Apply features in their fixed order
//! 5. Install the collected dependencies in batches
//!
//! Nothing is rolled back: a failure leaves the partially generated project
//! on disk and the error says how to continue by hand.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, info_span, instrument};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        feature::{Feature, FeatureContext, MutationRecord},
        ports::{CommandRunner, Filesystem, ScaffoldObserver, SilentObserver},
        services::installer::{InstallBatches, InstallReport, Installer},
    },
    domain::{
        CommandSpec, DependencyCollector, DomainValidator as validator, PackageManager,
        ProjectConfig, ProjectName, ScaffoldPlan,
    },
    error::NxtgenResult,
};

pub const DEFAULT_GENERATOR: &str = "create-next-app@latest";
pub const DEFAULT_IMPORT_ALIAS: &str = "@/*";

/// Information about a feature module for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureInfo {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldOptions {
    /// Generator package run through the package manager's dlx command.
    pub generator_package: String,
    pub import_alias: String,
    pub license_holder: Option<String>,
    pub skip_install: bool,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            generator_package: DEFAULT_GENERATOR.into(),
            import_alias: DEFAULT_IMPORT_ALIAS.into(),
            license_holder: None,
            skip_install: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    pub name: ProjectName,
    /// Directory the generator runs in; the project lands in a child of it.
    pub parent_dir: PathBuf,
    pub config: ProjectConfig,
    pub package_manager: PackageManager,
    pub options: ScaffoldOptions,
}

impl ScaffoldRequest {
    pub fn new(name: ProjectName, parent_dir: impl Into<PathBuf>, config: ProjectConfig) -> Self {
        Self {
            name,
            parent_dir: parent_dir.into(),
            config,
            package_manager: PackageManager::default(),
            options: ScaffoldOptions::default(),
        }
    }

    /// The generator treats the name as a path, so `@scope/app` nests.
    pub fn project_dir(&self) -> PathBuf {
        self.parent_dir.join(self.name.as_str())
    }
}

/// What a scaffold would do, without doing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldPreview {
    pub project: String,
    pub directory: PathBuf,
    pub package_manager: PackageManager,
    pub generator: String,
    pub features: Vec<String>,
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
    pub install_commands: Vec<String>,
    pub post_install: Vec<String>,
    pub warnings: Vec<String>,
}

/// Outcome of a completed scaffold run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldReport {
    pub run_id: String,
    pub project: String,
    pub directory: PathBuf,
    pub package_manager: PackageManager,
    pub features: Vec<String>,
    pub dependencies: DependencyCollector,
    pub files_written: Vec<PathBuf>,
    pub files_removed: Vec<PathBuf>,
    pub mutations: Vec<MutationRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install: Option<InstallReport>,
    pub warnings: Vec<String>,
    pub next_steps: Vec<String>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    runner: Box<dyn CommandRunner>,
    features: Vec<Box<dyn Feature>>,
    observer: Box<dyn ScaffoldObserver>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// `features` run in the order given.
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        runner: Box<dyn CommandRunner>,
        features: Vec<Box<dyn Feature>>,
    ) -> Self {
        Self {
            filesystem,
            runner,
            features,
            observer: Box::new(SilentObserver),
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn ScaffoldObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// List the available feature modules in execution order.
    pub fn features(&self) -> Vec<FeatureInfo> {
        self.features
            .iter()
            .map(|f| FeatureInfo {
                name: f.name().to_string(),
                description: f.description().to_string(),
            })
            .collect()
    }

    /// Compute the plan without touching the disk or running anything.
    pub fn plan(&self, request: &ScaffoldRequest) -> NxtgenResult<ScaffoldPreview> {
        validator::validate_config(&request.config)?;
        let plan = self.build_plan(&request.config);
        let batches = InstallBatches::from_plan(&plan, request.package_manager);

        let warnings = batches
            .dropped_dev
            .iter()
            .map(|p| format!("{p} is requested as both a runtime and a dev dependency; installing it once as runtime"))
            .collect();

        Ok(ScaffoldPreview {
            project: request.name.to_string(),
            directory: request.project_dir(),
            package_manager: request.package_manager,
            generator: self.generator_command(request).to_string(),
            features: plan.features().to_vec(),
            dependencies: batches.runtime,
            dev_dependencies: batches.dev,
            install_commands: batches.install.iter().map(ToString::to_string).collect(),
            post_install: batches
                .post_install
                .iter()
                .map(|(_, c)| c.to_string())
                .collect(),
            warnings,
        })
    }

    /// Scaffold a new project.
    #[instrument(
        skip_all,
        fields(
            project = %request.name,
            pm = %request.package_manager,
        )
    )]
    pub fn scaffold(&self, request: &ScaffoldRequest) -> NxtgenResult<ScaffoldReport> {
        let run_id = Uuid::new_v4().to_string();
        let _run = info_span!("scaffold_run", run_id = %run_id).entered();

        validator::validate_config(&request.config)?;
        let root = request.project_dir();
        if self.filesystem.exists(&root) {
            return Err(ApplicationError::ProjectExists { path: root }.into());
        }

        let plan = self.build_plan(&request.config);
        info!(
            features = plan.features().len(),
            packages = plan.dependencies().total_count(),
            "Plan built"
        );

        self.step("Generating Next.js project", || {
            let generator = self.generator_command(request);
            self.observer.command_started(&generator);
            self.runner.run(&generator, &request.parent_dir)
        })?;

        let mut ctx = FeatureContext::new(
            &root,
            &request.name,
            &request.config,
            request.package_manager,
            self.filesystem.as_ref(),
            self.observer.as_ref(),
        )
        .with_license_holder(request.options.license_holder.as_deref());

        for feature in self.enabled_features(&request.config) {
            ctx.enter(feature.name());
            self.step(feature.description(), || feature.apply(&mut ctx))?;
        }
        let log = ctx.into_log();

        let install = if request.options.skip_install {
            info!("Skipping dependency installation");
            None
        } else {
            let installer = Installer::new(self.runner.as_ref(), self.observer.as_ref());
            Some(self.step("Installing dependencies", || {
                installer.install(&plan, request.package_manager, &root)
            })?)
        };

        let mut warnings = log.warnings;
        if let Some(report) = &install {
            warnings.extend(report.warnings.iter().cloned());
        }

        let mut next_steps = vec![format!("cd {}", root.display())];
        if request.options.skip_install {
            next_steps.extend(
                InstallBatches::from_plan(&plan, request.package_manager).pending_from(0),
            );
        }
        next_steps.push(request.package_manager.run_script("dev"));

        info!(directory = %root.display(), "Scaffold completed successfully");
        Ok(ScaffoldReport {
            run_id,
            project: request.name.to_string(),
            directory: root,
            package_manager: request.package_manager,
            features: plan.features().to_vec(),
            dependencies: plan.dependencies().clone(),
            files_written: log.files_written,
            files_removed: log.files_removed,
            mutations: log.mutations,
            install,
            warnings,
            next_steps,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn enabled_features<'s>(
        &'s self,
        config: &'s ProjectConfig,
    ) -> impl Iterator<Item = &'s dyn Feature> + 's {
        self.features
            .iter()
            .map(|f| f.as_ref())
            .filter(move |f| f.is_enabled(config))
    }

    fn build_plan(&self, config: &ProjectConfig) -> ScaffoldPlan {
        let mut plan = ScaffoldPlan::new();
        for feature in self.enabled_features(config) {
            plan.record_feature(feature.name());
            feature.register(config, &mut plan);
        }
        plan
    }

    fn generator_command(&self, request: &ScaffoldRequest) -> CommandSpec {
        request
            .package_manager
            .dlx_command()
            .arg(&request.options.generator_package)
            .arg(request.name.as_str())
            .args([
                "--typescript",
                "--tailwind",
                "--eslint",
                "--app",
                "--src-dir",
                "--import-alias",
            ])
            .arg(&request.options.import_alias)
            .arg(request.package_manager.generator_flag())
    }

    fn step<T>(&self, label: &str, run: impl FnOnce() -> NxtgenResult<T>) -> NxtgenResult<T> {
        self.observer.step_started(label);
        let result = run();
        if result.is_ok() {
            self.observer.step_finished(label);
        }
        result
    }
}
