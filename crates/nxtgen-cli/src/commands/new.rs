//! Implementation of the `nxtgen new` command.
//!
//! Responsibility: turn flags, config defaults and prompt answers into a
//! `ScaffoldRequest`, call the core scaffold service, and display results.
//! No business logic lives here.

use std::io::IsTerminal as _;

use tracing::{debug, info, instrument};

use nxtgen_adapters::{LocalFilesystem, SystemCommandRunner, builtin_features};
use nxtgen_core::{
    application::{
        ScaffoldObserver, ScaffoldPreview, ScaffoldReport, ScaffoldRequest, ScaffoldService,
        SilentObserver,
    },
    domain::{
        AuthProvider, ExampleSet, License, Orm, PackageManager, ProjectConfig, ProjectName, UiKit,
    },
    error::NxtgenError,
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    config::{AppConfig, Defaults},
    error::{CliError, CliResult},
    output::OutputManager,
    progress::ProgressObserver,
    prompts::{DefaultsOnly, Prompter},
};

const DEFAULT_NAME: &str = "my-app";

/// Execute the `nxtgen new` command.
///
/// 1. Resolve the name, package manager and feature selection
/// 2. Early-exit with the plan if `--dry-run`
/// 3. Scaffold via `ScaffoldService` with a spinner observer
/// 4. Print the report and next steps
#[instrument(skip_all, fields(name = args.name.as_deref().unwrap_or("<prompt>")))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let interactive = !args.yes
        && !global.quiet
        && !output.is_json()
        && std::io::stdin().is_terminal()
        && std::io::stderr().is_terminal();
    let prompter = prompter(interactive);

    let name = resolve_name(args.name.as_deref(), interactive, prompter.as_ref())?;
    let agent = std::env::var("npm_config_user_agent").ok();
    let package_manager = resolve_package_manager(
        &args,
        &config.defaults,
        agent.as_deref(),
        prompter.as_ref(),
    )?;
    let selection = resolve_selection(&args, &config.defaults.project, prompter.as_ref())?;
    debug!(?selection, pm = %package_manager, "Selection resolved");

    let parent = std::env::current_dir()?;
    let mut request = ScaffoldRequest::new(name, parent, selection);
    request.package_manager = package_manager;
    request.options.generator_package = config.generator.package.clone();
    request.options.import_alias = config.generator.import_alias.clone();
    request.options.license_holder = config.license.holder.clone();
    request.options.skip_install = args.skip_install;

    if args.dry_run {
        let service = build_service(Box::new(SilentObserver));
        let preview = service.plan(&request)?;
        return if output.is_json() {
            output.json(&preview).map_err(Into::into)
        } else {
            render_preview(&preview, &output)
        };
    }

    let progress = ProgressObserver::new(output.supports_color());
    let observer: Box<dyn ScaffoldObserver> = if output.is_quiet() || output.is_json() {
        Box::new(SilentObserver)
    } else {
        Box::new(progress.clone())
    };
    let service = build_service(observer);

    output.header(&format!(
        "Creating '{}' in {}",
        request.name,
        request.project_dir().display()
    ))?;
    info!(project = %request.name, "Scaffold started");

    let result = service.scaffold(&request);
    progress.finish();
    let report = result?;

    if output.is_json() {
        output.json(&report)?;
    } else {
        render_report(&report, &output)?;
    }
    Ok(())
}

fn build_service(observer: Box<dyn ScaffoldObserver>) -> ScaffoldService {
    ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(SystemCommandRunner::new()),
        builtin_features(),
    )
    .with_observer(observer)
}

#[cfg(feature = "interactive")]
fn prompter(interactive: bool) -> Box<dyn Prompter> {
    if interactive {
        Box::new(crate::prompts::TerminalPrompter::new())
    } else {
        Box::new(DefaultsOnly)
    }
}

#[cfg(not(feature = "interactive"))]
fn prompter(_interactive: bool) -> Box<dyn Prompter> {
    Box::new(DefaultsOnly)
}

// ── Resolution ────────────────────────────────────────────────────────────────

fn resolve_name(
    given: Option<&str>,
    interactive: bool,
    prompter: &dyn Prompter,
) -> CliResult<ProjectName> {
    let raw = match given {
        Some(name) => name.to_string(),
        None if interactive => prompter.input("What is the name of your project?", DEFAULT_NAME)?,
        None => {
            return Err(CliError::InvalidInput {
                message: "a project name is required when not running interactively".into(),
                source: None,
            });
        }
    };
    ProjectName::parse(raw.trim()).map_err(|e| NxtgenError::from(e).into())
}

/// Flag, then config, then the invoking package manager's user agent.
/// Only the last case is offered as a question.
fn resolve_package_manager(
    args: &NewArgs,
    defaults: &Defaults,
    user_agent: Option<&str>,
    prompter: &dyn Prompter,
) -> CliResult<PackageManager> {
    if let Some(pm) = args.package_manager {
        return Ok(pm.into());
    }
    if let Some(pm) = defaults.package_manager {
        return Ok(pm);
    }
    let detected = user_agent
        .map(PackageManager::from_user_agent)
        .unwrap_or_default();
    let options = PackageManager::ALL.map(|pm| (pm, pm.as_str()));
    choose(prompter, "Which package manager?", &options, detected)
}

/// Merge flags over prompt answers, using config defaults as the initial
/// answers.
fn resolve_selection(
    args: &NewArgs,
    defaults: &ProjectConfig,
    prompter: &dyn Prompter,
) -> CliResult<ProjectConfig> {
    let confirm = |flag: Option<bool>, prompt: &str, default: bool| match flag {
        Some(value) => Ok(value),
        None => prompter.confirm(prompt, default),
    };

    let orm = match args.orm {
        Some(orm) => orm.into(),
        None => choose(
            prompter,
            "Which ORM would you like to use?",
            &[(Orm::Prisma, "Prisma"), (Orm::Drizzle, "Drizzle"), (Orm::None, "None")],
            defaults.orm,
        )?,
    };
    let react_query = confirm(
        args.react_query,
        "React Query (TanStack Query) for state management?",
        defaults.react_query,
    )?;
    let axios = confirm(args.axios, "Axios for API requests?", defaults.axios)?;
    let orval = match args.orval {
        Some(value) => value,
        None if react_query && axios => confirm(
            None,
            "Generate a typed API client with Orval?",
            defaults.orval,
        )?,
        None => false,
    };
    let auth = match args.auth {
        Some(auth) => auth.into(),
        None => choose(
            prompter,
            "Authentication provider:",
            &[
                (AuthProvider::NextAuth, "Auth.js (NextAuth)"),
                (AuthProvider::Clerk, "Clerk"),
                (AuthProvider::None, "None"),
            ],
            defaults.auth,
        )?,
    };
    let ui = match args.ui {
        Some(ui) => ui.into(),
        None => choose(
            prompter,
            "shadcn/ui or HeroUI for UI components?",
            &[
                (UiKit::Shadcn, "shadcn/ui"),
                (UiKit::HeroUi, "HeroUI"),
                (UiKit::Both, "Both"),
                (UiKit::None, "None"),
            ],
            defaults.ui,
        )?,
    };
    let framer_motion = confirm(
        args.framer_motion,
        "Framer Motion for animations?",
        defaults.framer_motion,
    )?;
    let lucide = confirm(args.lucide, "Lucide React for icons?", defaults.lucide)?;

    let examples = match args.examples {
        Some(examples) => examples.into(),
        None => {
            // Auth examples are only offered once there is a provider.
            let mut options = vec![(ExampleSet::Crud, "CRUD operations example")];
            if auth.is_some() {
                options.push((ExampleSet::Auth, "Authentication example"));
                options.push((ExampleSet::Both, "Both"));
            }
            options.push((ExampleSet::None, "None"));
            choose(prompter, "Example processes and pages?", &options, defaults.examples)?
        }
    };

    let docker = confirm(
        args.docker,
        "Generate a Dockerfile for containerization?",
        defaults.docker,
    )?;
    let ci = confirm(args.ci, "Add a GitHub Actions CI workflow?", defaults.ci)?;
    let husky = confirm(
        args.husky,
        "Set up Husky and lint-staged for code quality?",
        defaults.husky,
    )?;
    let vitest = confirm(
        args.vitest,
        "Install Vitest and React Testing Library?",
        defaults.vitest,
    )?;
    let playwright = confirm(
        args.playwright,
        "Install Playwright for E2E testing?",
        defaults.playwright,
    )?;
    let storybook = confirm(args.storybook, "Initialize Storybook?", defaults.storybook)?;
    let forms = confirm(
        args.forms,
        "Set up forms (React Hook Form + Zod)?",
        defaults.forms,
    )?;
    let intl = confirm(
        args.intl,
        "Add internationalization (next-intl)?",
        defaults.intl,
    )?;
    let license = match args.license {
        Some(license) => license.into(),
        None => choose(
            prompter,
            "Choose a license for your project:",
            &[
                (License::Mit, "MIT"),
                (License::Apache, "Apache 2.0"),
                (License::None, "None"),
            ],
            defaults.license,
        )?,
    };

    Ok(ProjectConfig {
        orm,
        react_query,
        axios,
        orval,
        ui,
        framer_motion,
        lucide,
        examples,
        docker,
        ci,
        husky,
        vitest,
        playwright,
        storybook,
        forms,
        intl,
        auth,
        license,
    })
}

/// Ask a select question. A default that is not among the options falls back
/// to the last one.
fn choose<T: Copy + PartialEq>(
    prompter: &dyn Prompter,
    prompt: &str,
    options: &[(T, &str)],
    default: T,
) -> CliResult<T> {
    let labels: Vec<&str> = options.iter().map(|(_, label)| *label).collect();
    let fallback = options.len().saturating_sub(1);
    let initial = options
        .iter()
        .position(|(value, _)| *value == default)
        .unwrap_or(fallback);
    let index = prompter.select(prompt, &labels, initial)?;
    options
        .get(index)
        .map(|(value, _)| *value)
        .ok_or_else(|| CliError::InvalidInput {
            message: format!("no option {index} for '{prompt}'"),
            source: None,
        })
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn render_preview(preview: &ScaffoldPreview, output: &OutputManager) -> CliResult<()> {
    output.header(&format!("Dry run: would create '{}'", preview.project))?;
    output.field("Directory", &preview.directory.display().to_string())?;
    output.field("Package manager", preview.package_manager.as_str())?;
    output.field("Generator", &preview.generator)?;
    output.field("Features", &preview.features.join(", "))?;
    output.field("Dependencies", &or_none(&preview.dependencies))?;
    output.field("Dev dependencies", &or_none(&preview.dev_dependencies))?;

    output.print("")?;
    output.print("Commands:")?;
    for command in preview.install_commands.iter().chain(&preview.post_install) {
        output.print(&format!("  $ {command}"))?;
    }
    for warning in &preview.warnings {
        output.warning(warning)?;
    }
    Ok(())
}

fn render_report(report: &ScaffoldReport, output: &OutputManager) -> CliResult<()> {
    output.print("")?;
    output.success(&format!(
        "Project '{}' created at {}",
        report.project,
        report.directory.display()
    ))?;
    output.field("Features", &report.features.join(", "))?;
    output.field(
        "Files",
        &format!(
            "{} written, {} removed, {} updated",
            report.files_written.len(),
            report.files_removed.len(),
            report.mutations.len()
        ),
    )?;
    if let Some(install) = &report.install {
        let failed = install.post_install.iter().filter(|s| !s.succeeded).count();
        if failed > 0 {
            output.field(
                "Post-install",
                &format!("{failed} step(s) need to be re-run by hand"),
            )?;
        }
    }

    output.print("")?;
    output.print("Next steps:")?;
    for step in &report.next_steps {
        output.print(&format!("  {step}"))?;
    }
    Ok(())
}

fn or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".into()
    } else {
        items.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::cli::{AuthArg, ExamplesArg, OrmArg, PmArg};

    /// Answers selects and confirms from a script, recording each prompt.
    #[derive(Default)]
    struct Scripted {
        selects: RefCell<Vec<usize>>,
        confirms: RefCell<Vec<bool>>,
        asked: RefCell<Vec<String>>,
        offered: RefCell<Vec<Vec<String>>>,
    }

    impl Prompter for Scripted {
        fn select(&self, prompt: &str, items: &[&str], default: usize) -> CliResult<usize> {
            self.asked.borrow_mut().push(prompt.into());
            self.offered
                .borrow_mut()
                .push(items.iter().map(|s| s.to_string()).collect());
            let mut queue = self.selects.borrow_mut();
            Ok(if queue.is_empty() { default } else { queue.remove(0) })
        }

        fn confirm(&self, prompt: &str, default: bool) -> CliResult<bool> {
            self.asked.borrow_mut().push(prompt.into());
            let mut queue = self.confirms.borrow_mut();
            Ok(if queue.is_empty() { default } else { queue.remove(0) })
        }

        fn input(&self, _prompt: &str, default: &str) -> CliResult<String> {
            Ok(default.into())
        }
    }

    #[test]
    fn flags_win_over_defaults() {
        let args = NewArgs {
            orm: Some(OrmArg::Drizzle),
            vitest: Some(true),
            lucide: Some(false),
            ..NewArgs::default()
        };
        let config = resolve_selection(&args, &ProjectConfig::default(), &DefaultsOnly).unwrap();
        assert_eq!(config.orm, Orm::Drizzle);
        assert!(config.vitest);
        assert!(!config.lucide);
        assert!(!config.docker);
    }

    #[test]
    fn config_defaults_fill_unset_options() {
        let defaults = ProjectConfig {
            docker: true,
            license: License::Apache,
            ..ProjectConfig::default()
        };
        let config = resolve_selection(&NewArgs::default(), &defaults, &DefaultsOnly).unwrap();
        assert!(config.docker);
        assert_eq!(config.license, License::Apache);
    }

    #[test]
    fn orval_is_only_asked_with_react_query_and_axios() {
        let prompter = Scripted::default();
        let args = NewArgs {
            react_query: Some(true),
            axios: Some(false),
            ..NewArgs::default()
        };
        let config = resolve_selection(&args, &ProjectConfig::default(), &prompter).unwrap();
        assert!(!config.orval);
        assert!(!prompter.asked.borrow().iter().any(|p| p.contains("Orval")));

        let prompter = Scripted::default();
        prompter.confirms.borrow_mut().push(true);
        let args = NewArgs {
            react_query: Some(true),
            axios: Some(true),
            ..NewArgs::default()
        };
        let config = resolve_selection(&args, &ProjectConfig::default(), &prompter).unwrap();
        assert!(config.orval);
    }

    #[test]
    fn auth_examples_are_offered_only_with_a_provider() {
        let prompter = Scripted::default();
        let args = NewArgs {
            auth: Some(AuthArg::None),
            ..NewArgs::default()
        };
        resolve_selection(&args, &ProjectConfig::default(), &prompter).unwrap();
        let offered = prompter.offered.borrow();
        let examples = offered
            .iter()
            .find(|items| items.iter().any(|i| i.starts_with("CRUD")))
            .unwrap();
        assert_eq!(examples.len(), 2);

        let prompter = Scripted::default();
        let args = NewArgs {
            auth: Some(AuthArg::Clerk),
            ..NewArgs::default()
        };
        prompter.selects.borrow_mut().extend([3, 0, 2]);
        let config = resolve_selection(
            &NewArgs {
                orm: Some(OrmArg::None),
                ..args
            },
            &ProjectConfig::default(),
            &prompter,
        )
        .unwrap();
        // answers go to ui, examples, license in that order
        assert_eq!(config.ui, UiKit::None);
        assert_eq!(config.examples, ExampleSet::Crud);
        assert_eq!(config.license, License::None);
    }

    #[test]
    fn auth_example_default_without_provider_falls_back_to_none() {
        let defaults = ProjectConfig {
            examples: ExampleSet::Both,
            ..ProjectConfig::default()
        };
        let config = resolve_selection(&NewArgs::default(), &defaults, &DefaultsOnly).unwrap();
        assert_eq!(config.examples, ExampleSet::None);

        let args = NewArgs {
            examples: Some(ExamplesArg::Auth),
            ..NewArgs::default()
        };
        let config = resolve_selection(&args, &ProjectConfig::default(), &DefaultsOnly).unwrap();
        assert_eq!(config.examples, ExampleSet::Auth);
    }

    #[test]
    fn package_manager_precedence() {
        let defaults = Defaults {
            package_manager: Some(PackageManager::Yarn),
            ..Defaults::default()
        };
        let flagged = NewArgs {
            package_manager: Some(PmArg::Bun),
            ..NewArgs::default()
        };
        let pm = resolve_package_manager(&flagged, &defaults, Some("pnpm/9.0.0"), &DefaultsOnly);
        assert_eq!(pm.unwrap(), PackageManager::Bun);

        let pm = resolve_package_manager(&NewArgs::default(), &defaults, Some("pnpm/9.0.0"), &DefaultsOnly);
        assert_eq!(pm.unwrap(), PackageManager::Yarn);

        let pm = resolve_package_manager(
            &NewArgs::default(),
            &Defaults::default(),
            Some("pnpm/9.0.0 npm/? node/v20"),
            &DefaultsOnly,
        );
        assert_eq!(pm.unwrap(), PackageManager::Pnpm);

        let pm = resolve_package_manager(&NewArgs::default(), &Defaults::default(), None, &DefaultsOnly);
        assert_eq!(pm.unwrap(), PackageManager::Npm);
    }

    #[test]
    fn name_is_required_without_a_terminal() {
        let err = resolve_name(None, false, &DefaultsOnly).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(resolve_name(None, true, &DefaultsOnly).unwrap().as_str(), "my-app");
    }

    #[test]
    fn invalid_name_is_a_user_error() {
        let err = resolve_name(Some("Bad_Name"), false, &DefaultsOnly).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Invalid project name"));
    }
}
