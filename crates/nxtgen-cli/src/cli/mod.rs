//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

use nxtgen_core::domain::{AuthProvider, ExampleSet, License, Orm, PackageManager, UiKit};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "nxtgen",
    bin_name = "nxtgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Next.js projects with the stack already wired in",
    long_about = "nxtgen runs create-next-app, then layers the selected features \
                  on top: data layer, data fetching, UI kit, auth, testing and more. \
                  Dependencies are installed in one runtime and one dev batch.",
    after_help = "EXAMPLES:\n\
        \x20 nxtgen new my-app\n\
        \x20 nxtgen new my-app --orm prisma --react-query --ui shadcn --yes\n\
        \x20 nxtgen new my-app --auth clerk --examples both --dry-run\n\
        \x20 nxtgen completions bash > /usr/share/bash-completion/completions/nxtgen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new Next.js project.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        after_help = "Options left out are asked for interactively, or taken from the\n\
            configuration defaults with --yes.\n\n\
            EXAMPLES:\n\
            \x20 nxtgen new shop --pm pnpm --orm drizzle --examples crud\n\
            \x20 nxtgen new blog --react-query --axios --orval --yes\n\
            \x20 nxtgen new site --ui heroui --framer-motion --license mit -y"
    )]
    New(NewArgs),

    /// List the built-in feature modules.
    #[command(
        visible_alias = "ls",
        about = "List feature modules in the order they run",
        after_help = "EXAMPLES:\n\
            \x20 nxtgen list\n\
            \x20 nxtgen list --format json"
    )]
    List(ListArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 nxtgen init           # user config directory\n\
            \x20 nxtgen init --local   # .nxtgen.toml in the current directory"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 nxtgen completions bash > ~/.local/share/bash-completion/completions/nxtgen\n\
            \x20 nxtgen completions zsh  > ~/.zfunc/_nxtgen\n\
            \x20 nxtgen completions fish > ~/.config/fish/completions/nxtgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the nxtgen configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 nxtgen config get defaults.orm\n\
            \x20 nxtgen config set defaults.package_manager pnpm\n\
            \x20 nxtgen config list"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `nxtgen new`.
///
/// Every feature option is `Option` so that "not given" can be told apart
/// from an explicit `--flag=false`.
#[derive(Debug, Default, Args)]
pub struct NewArgs {
    /// npm package name; asked for when omitted.
    #[arg(value_name = "NAME", help = "Project name (npm package name rules)")]
    pub name: Option<String>,

    #[arg(long = "pm", value_name = "PM", value_enum, help = "Package manager")]
    pub package_manager: Option<PmArg>,

    #[arg(long, value_enum, help = "ORM / data layer")]
    pub orm: Option<OrmArg>,

    #[arg(long = "react-query", value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true", help = "TanStack Query with a provider")]
    pub react_query: Option<bool>,

    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true", help = "Axios API client")]
    pub axios: Option<bool>,

    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true", help = "Orval client generation (needs --react-query and --axios)")]
    pub orval: Option<bool>,

    #[arg(long, value_enum, help = "UI component library")]
    pub ui: Option<UiArg>,

    #[arg(long = "framer-motion", value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true", help = "Framer Motion animations")]
    pub framer_motion: Option<bool>,

    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true", help = "Lucide icons")]
    pub lucide: Option<bool>,

    #[arg(long, value_enum, help = "Example pages")]
    pub examples: Option<ExamplesArg>,

    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true", help = "Dockerfile and .dockerignore")]
    pub docker: Option<bool>,

    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true", help = "GitHub Actions workflow")]
    pub ci: Option<bool>,

    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true", help = "Husky and lint-staged")]
    pub husky: Option<bool>,

    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true", help = "Vitest and React Testing Library")]
    pub vitest: Option<bool>,

    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true", help = "Playwright end-to-end tests")]
    pub playwright: Option<bool>,

    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true", help = "Initialise Storybook")]
    pub storybook: Option<bool>,

    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true", help = "React Hook Form and Zod")]
    pub forms: Option<bool>,

    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true", help = "next-intl internationalization")]
    pub intl: Option<bool>,

    #[arg(long, value_enum, help = "Authentication provider")]
    pub auth: Option<AuthArg>,

    #[arg(long, value_enum, help = "License file")]
    pub license: Option<LicenseArg>,

    /// Generate and apply features, but leave installation to the user.
    #[arg(long = "skip-install", help = "Do not install dependencies")]
    pub skip_install: bool,

    #[arg(
        short = 'y',
        long = "yes",
        help = "Use defaults for unset options instead of prompting"
    )]
    pub yes: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show the plan without creating anything")]
    pub dry_run: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `nxtgen list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `nxtgen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write `.nxtgen.toml` in the current directory instead.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `nxtgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `nxtgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.orm`.
        key: String,
    },
    /// Set a configuration key in the user config file.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the user configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PmArg {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrmArg {
    Prisma,
    Drizzle,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UiArg {
    Shadcn,
    #[value(alias = "hero")]
    Heroui,
    Both,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExamplesArg {
    Crud,
    Auth,
    Both,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AuthArg {
    #[value(alias = "authjs")]
    NextAuth,
    Clerk,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LicenseArg {
    Mit,
    Apache,
    None,
}

impl From<PmArg> for PackageManager {
    fn from(arg: PmArg) -> Self {
        match arg {
            PmArg::Npm => Self::Npm,
            PmArg::Pnpm => Self::Pnpm,
            PmArg::Yarn => Self::Yarn,
            PmArg::Bun => Self::Bun,
        }
    }
}

impl From<OrmArg> for Orm {
    fn from(arg: OrmArg) -> Self {
        match arg {
            OrmArg::Prisma => Self::Prisma,
            OrmArg::Drizzle => Self::Drizzle,
            OrmArg::None => Self::None,
        }
    }
}

impl From<UiArg> for UiKit {
    fn from(arg: UiArg) -> Self {
        match arg {
            UiArg::Shadcn => Self::Shadcn,
            UiArg::Heroui => Self::HeroUi,
            UiArg::Both => Self::Both,
            UiArg::None => Self::None,
        }
    }
}

impl From<ExamplesArg> for ExampleSet {
    fn from(arg: ExamplesArg) -> Self {
        match arg {
            ExamplesArg::Crud => Self::Crud,
            ExamplesArg::Auth => Self::Auth,
            ExamplesArg::Both => Self::Both,
            ExamplesArg::None => Self::None,
        }
    }
}

impl From<AuthArg> for AuthProvider {
    fn from(arg: AuthArg) -> Self {
        match arg {
            AuthArg::NextAuth => Self::NextAuth,
            AuthArg::Clerk => Self::Clerk,
            AuthArg::None => Self::None,
        }
    }
}

impl From<LicenseArg> for License {
    fn from(arg: LicenseArg) -> Self {
        match arg {
            LicenseArg::Mit => Self::Mit,
            LicenseArg::Apache => Self::Apache,
            LicenseArg::None => Self::None,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse_new(args: &[&str]) -> NewArgs {
        let cli = Cli::parse_from(["nxtgen", "new"].iter().chain(args));
        match cli.command {
            Commands::New(args) => args,
            other => panic!("expected New command, got {other:?}"),
        }
    }

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_flag_means_true_and_absent_means_unset() {
        let args = parse_new(&["app", "--react-query", "--docker=false"]);
        assert_eq!(args.react_query, Some(true));
        assert_eq!(args.docker, Some(false));
        assert_eq!(args.axios, None);
    }

    #[test]
    fn boolean_flag_does_not_swallow_the_name() {
        let args = parse_new(&["--vitest", "app"]);
        assert_eq!(args.vitest, Some(true));
        assert_eq!(args.name.as_deref(), Some("app"));
    }

    #[test]
    fn value_enums_convert_to_domain() {
        let args = parse_new(&["app", "--pm", "pnpm", "--ui", "hero", "--auth", "next-auth"]);
        assert_eq!(args.package_manager.map(PackageManager::from), Some(PackageManager::Pnpm));
        assert_eq!(args.ui.map(UiKit::from), Some(UiKit::HeroUi));
        assert_eq!(args.auth.map(AuthProvider::from), Some(AuthProvider::NextAuth));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["nxtgen", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn no_color_is_a_plain_switch() {
        let cli = Cli::try_parse_from(["nxtgen", "--no-color", "list"]).unwrap();
        assert!(cli.global.no_color);
    }

    #[test]
    fn unknown_orm_is_rejected() {
        let result = Cli::try_parse_from(["nxtgen", "new", "app", "--orm", "mongoose"]);
        assert!(result.is_err());
    }
}
