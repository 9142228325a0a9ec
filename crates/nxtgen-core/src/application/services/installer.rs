//! Installer - drains the dependency plan into batched package-manager calls.
//!
//! At most two install invocations run, runtime packages first, then dev
//! packages. A failure there aborts the installer (post-install steps are
//! skipped) and surfaces `ApplicationError::InstallFailed`, whose suggestions
//! carry the manual recovery commands. Post-install steps run afterwards; a
//! failing step only produces a warning because the project is already
//! usable without it.

use std::path::Path;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandRunner, ScaffoldObserver},
    },
    domain::{CommandSpec, PackageManager, ScaffoldPlan},
    error::NxtgenResult,
};

/// The commands an install would run, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallBatches {
    pub runtime: Vec<String>,
    pub dev: Vec<String>,
    /// Requested as dev dependencies but already installed as runtime ones.
    pub dropped_dev: Vec<String>,
    pub install: Vec<CommandSpec>,
    pub post_install: Vec<(String, CommandSpec)>,
}

impl InstallBatches {
    /// Runtime wins: a package in both sets is installed once, as runtime.
    pub fn from_plan(plan: &ScaffoldPlan, pm: PackageManager) -> Self {
        let deps = plan.dependencies();
        let runtime = deps.deps().to_vec();
        let (dropped_dev, dev): (Vec<String>, Vec<String>) = deps
            .dev_deps()
            .iter()
            .cloned()
            .partition(|d| deps.runtime_set().contains(d));

        let mut install = Vec::new();
        if !runtime.is_empty() {
            install.push(pm.install_command(&runtime, false));
        }
        if !dev.is_empty() {
            install.push(pm.install_command(&dev, true));
        }

        let post_install = plan
            .post_install()
            .iter()
            .map(|step| (step.label.clone(), step.command(pm)))
            .collect();

        Self {
            runtime,
            dev,
            dropped_dev,
            install,
            post_install,
        }
    }

    /// Install commands from index `from` onwards, then every post-install
    /// command: what is left to run by hand when the install stops there.
    pub fn pending_from(&self, from: usize) -> Vec<String> {
        self.install
            .iter()
            .skip(from)
            .chain(self.post_install.iter().map(|(_, command)| command))
            .map(ToString::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepResult {
    pub label: String,
    pub command: String,
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    pub commands: Vec<String>,
    pub post_install: Vec<StepResult>,
    pub warnings: Vec<String>,
}

pub struct Installer<'a> {
    runner: &'a dyn CommandRunner,
    observer: &'a dyn ScaffoldObserver,
}

impl<'a> Installer<'a> {
    pub fn new(runner: &'a dyn CommandRunner, observer: &'a dyn ScaffoldObserver) -> Self {
        Self { runner, observer }
    }

    #[instrument(skip_all, fields(pm = %pm, dir = %dir.display()))]
    pub fn install(
        &self,
        plan: &ScaffoldPlan,
        pm: PackageManager,
        dir: &Path,
    ) -> NxtgenResult<InstallReport> {
        let batches = InstallBatches::from_plan(plan, pm);
        let mut report = InstallReport::default();

        for package in &batches.dropped_dev {
            let message =
                format!("{package} is requested as both a runtime and a dev dependency; installing it once as runtime");
            warn!("{message}");
            self.observer.warning(&message);
            report.warnings.push(message);
        }

        for (index, command) in batches.install.iter().enumerate() {
            self.observer.command_started(command);
            info!(command = %command, "Installing dependencies");
            self.runner
                .run(command, dir)
                .map_err(|e| ApplicationError::InstallFailed {
                    dir: dir.to_path_buf(),
                    package_manager: pm.to_string(),
                    reason: e.to_string(),
                    remaining: batches.pending_from(index),
                })?;
            report.commands.push(command.to_string());
        }

        for (label, command) in &batches.post_install {
            self.observer.step_started(label);
            self.observer.command_started(command);
            let result = self.runner.run(command, dir);
            if result.is_ok() {
                self.observer.step_finished(label);
            }

            let error = match result {
                Ok(()) => None,
                Err(e) => {
                    let message = format!(
                        "{label} failed: {e}. Run `{command}` in {} manually",
                        dir.display()
                    );
                    warn!("{message}");
                    self.observer.warning(&message);
                    report.warnings.push(message);
                    Some(e.to_string())
                }
            };
            report.post_install.push(StepResult {
                label: label.clone(),
                command: command.to_string(),
                succeeded: error.is_none(),
                error,
            });
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use mockall::predicate::*;
    use mockall::Sequence;

    use super::*;
    use crate::{
        application::ports::{MockCommandRunner, SilentObserver},
        error::NxtgenError,
    };

    fn plan() -> ScaffoldPlan {
        let mut plan = ScaffoldPlan::new();
        plan.dependencies_mut().add_deps(["@prisma/client", "axios"]);
        plan.dependencies_mut().add_dev_deps(["prisma", "axios"]);
        plan.add_post_install("Generating Prisma client", ["prisma", "generate"]);
        plan
    }

    fn program_is(expected: &'static str, first_arg: &'static str) -> impl Fn(&CommandSpec) -> bool {
        move |c: &CommandSpec| {
            c.program == expected && c.args.first().map(String::as_str) == Some(first_arg)
        }
    }

    #[test]
    fn runtime_wins_over_dev() {
        let batches = InstallBatches::from_plan(&plan(), PackageManager::Pnpm);
        assert_eq!(batches.runtime, vec!["@prisma/client", "axios"]);
        assert_eq!(batches.dev, vec!["prisma"]);
        assert_eq!(batches.dropped_dev, vec!["axios"]);
        assert_eq!(
            batches.install[1].to_string(),
            "pnpm add -D prisma"
        );
    }

    #[test]
    fn pending_commands_start_at_the_failed_batch() {
        let batches = InstallBatches::from_plan(&plan(), PackageManager::Npm);
        assert_eq!(
            batches.pending_from(1),
            vec!["npm install -D prisma", "npx prisma generate"]
        );
        assert_eq!(batches.pending_from(0).len(), 3);
    }

    #[test]
    fn empty_plan_installs_nothing() {
        let batches = InstallBatches::from_plan(&ScaffoldPlan::new(), PackageManager::Npm);
        assert!(batches.install.is_empty());
    }

    #[test]
    fn runs_runtime_then_dev_then_post_install() {
        let mut runner = MockCommandRunner::new();
        let mut seq = Sequence::new();
        let dir = PathBuf::from("/work/app");

        runner
            .expect_run()
            .withf(|c, _| c.to_string() == "npm install @prisma/client axios")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        runner
            .expect_run()
            .withf(|c, _| c.to_string() == "npm install -D prisma")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        runner
            .expect_run()
            .withf(|c, cwd| c.to_string() == "npx prisma generate" && cwd == Path::new("/work/app"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let report = Installer::new(&runner, &SilentObserver)
            .install(&plan(), PackageManager::Npm, &dir)
            .unwrap();
        assert_eq!(report.commands.len(), 2);
        assert!(report.post_install[0].succeeded);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn install_failure_skips_the_rest() {
        let mut runner = MockCommandRunner::new();
        let is_runtime = program_is("yarn", "add");
        runner
            .expect_run()
            .withf(move |c, _| is_runtime(c))
            .times(1)
            .returning(|c, _| {
                Err(ApplicationError::CommandFailed {
                    command: c.to_string(),
                    status: "exit status: 1".into(),
                }
                .into())
            });

        let err = Installer::new(&runner, &SilentObserver)
            .install(&plan(), PackageManager::Yarn, Path::new("/work/app"))
            .unwrap_err();

        assert!(err.is_install_failure());
        let suggestions = err.suggestions();
        assert!(suggestions.contains(&"cd /work/app".to_string()));
        assert!(suggestions.contains(&"yarn add @prisma/client axios".to_string()));
        assert!(suggestions.contains(&"yarn add -D prisma".to_string()));
        assert!(suggestions.contains(&"npx prisma generate".to_string()));
        assert!(!suggestions.contains(&"yarn install".to_string()));
        assert!(matches!(
            err,
            NxtgenError::Application(ApplicationError::InstallFailed { .. })
        ));
    }

    #[test]
    fn post_install_failure_is_a_warning() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .with(function(program_is("bun", "add")), always())
            .times(2)
            .returning(|_, _| Ok(()));
        runner
            .expect_run()
            .with(function(program_is("bun", "x")), always())
            .times(1)
            .returning(|c, _| {
                Err(ApplicationError::CommandSpawnFailed {
                    program: c.program.clone(),
                    reason: "not found".into(),
                }
                .into())
            });

        let report = Installer::new(&runner, &SilentObserver)
            .install(&plan(), PackageManager::Bun, Path::new("/work/app"))
            .unwrap();
        assert!(!report.post_install[0].succeeded);
        assert!(report.warnings.iter().any(|w| w.contains("bun x prisma generate")));
    }
}
