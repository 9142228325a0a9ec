//! Domain value objects: PackageManager, Orm, UiKit, AuthProvider, ExampleSet, License.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! Each carries its string form and a `FromStr` parser. The package manager
//! additionally knows the command shapes it exposes; those are pure functions
//! of the variant and never touch the process environment.

use crate::domain::entities::command::CommandSpec;
use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── PackageManager ───────────────────────────────────────────────────────────

/// A JavaScript package manager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    pub const ALL: [PackageManager; 4] = [Self::Npm, Self::Pnpm, Self::Yarn, Self::Bun];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
            Self::Bun => "bun",
        }
    }

    /// Infer the manager from an `npm_config_user_agent` value.
    ///
    /// The agent string starts with `<name>/<version>`; anything unrecognised
    /// falls back to npm.
    pub fn from_user_agent(agent: &str) -> Self {
        if agent.starts_with("pnpm") {
            Self::Pnpm
        } else if agent.starts_with("yarn") {
            Self::Yarn
        } else if agent.starts_with("bun") {
            Self::Bun
        } else {
            Self::Npm
        }
    }

    /// Install command for a batch of packages.
    ///
    /// An empty batch yields a bare `<pm> install` (lockfile install).
    /// Otherwise npm uses `install` and the rest use `add`, with `-D` for
    /// development dependencies.
    pub fn install_command<S: AsRef<str>>(&self, packages: &[S], dev: bool) -> CommandSpec {
        let cmd = CommandSpec::new(self.as_str());
        if packages.is_empty() {
            return cmd.arg("install");
        }

        let verb = match self {
            Self::Npm => "install",
            _ => "add",
        };
        let mut cmd = cmd.arg(verb);
        if dev {
            cmd = cmd.arg("-D");
        }
        cmd.args(packages.iter().map(|p| p.as_ref()))
    }

    /// Command prefix for running a published binary without installing it.
    pub fn dlx_command(&self) -> CommandSpec {
        match self {
            Self::Pnpm => CommandSpec::new("pnpm").arg("dlx"),
            Self::Bun => CommandSpec::new("bun").arg("x"),
            Self::Npm | Self::Yarn => CommandSpec::new("npx"),
        }
    }

    /// Shell text for running a package.json script, e.g. `npm run dev`.
    pub fn run_script(&self, script: &str) -> String {
        match self {
            // `bun test` and `bun build` are builtins, not scripts.
            Self::Npm | Self::Bun => format!("{} run {script}", self.as_str()),
            other => format!("{} {script}", other.as_str()),
        }
    }

    /// The `create-next-app` flag selecting this manager.
    pub fn generator_flag(&self) -> String {
        format!("--use-{}", self.as_str())
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "pnpm" => Ok(Self::Pnpm),
            "yarn" => Ok(Self::Yarn),
            "bun" => Ok(Self::Bun),
            other => Err(DomainError::UnknownValue {
                kind: "package manager",
                value: other.into(),
            }),
        }
    }
}

// ── Orm ──────────────────────────────────────────────────────────────────────

/// Data-access layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orm {
    Prisma,
    Drizzle,
    #[default]
    None,
}

impl Orm {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Prisma => "prisma",
            Self::Drizzle => "drizzle",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Orm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orm {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prisma" => Ok(Self::Prisma),
            "drizzle" => Ok(Self::Drizzle),
            "none" | "" => Ok(Self::None),
            other => Err(DomainError::UnknownValue {
                kind: "orm",
                value: other.into(),
            }),
        }
    }
}

// ── UiKit ────────────────────────────────────────────────────────────────────

/// Component library selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiKit {
    Shadcn,
    HeroUi,
    Both,
    #[default]
    None,
}

impl UiKit {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Shadcn => "shadcn",
            Self::HeroUi => "heroui",
            Self::Both => "both",
            Self::None => "none",
        }
    }

    pub const fn includes_shadcn(self) -> bool {
        matches!(self, Self::Shadcn | Self::Both)
    }

    pub const fn includes_heroui(self) -> bool {
        matches!(self, Self::HeroUi | Self::Both)
    }
}

impl fmt::Display for UiKit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UiKit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "shadcn" => Ok(Self::Shadcn),
            "heroui" | "hero" => Ok(Self::HeroUi),
            "both" => Ok(Self::Both),
            "none" | "" => Ok(Self::None),
            other => Err(DomainError::UnknownValue {
                kind: "ui kit",
                value: other.into(),
            }),
        }
    }
}

// ── AuthProvider ─────────────────────────────────────────────────────────────

/// Authentication provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthProvider {
    NextAuth,
    Clerk,
    #[default]
    None,
}

impl AuthProvider {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NextAuth => "next-auth",
            Self::Clerk => "clerk",
            Self::None => "none",
        }
    }

    pub const fn is_some(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthProvider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "next-auth" | "nextauth" | "authjs" => Ok(Self::NextAuth),
            "clerk" => Ok(Self::Clerk),
            "none" | "" => Ok(Self::None),
            other => Err(DomainError::UnknownValue {
                kind: "auth provider",
                value: other.into(),
            }),
        }
    }
}

// ── ExampleSet ───────────────────────────────────────────────────────────────

/// Which example pages to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExampleSet {
    Crud,
    Auth,
    Both,
    #[default]
    None,
}

impl ExampleSet {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Crud => "crud",
            Self::Auth => "auth",
            Self::Both => "both",
            Self::None => "none",
        }
    }

    pub const fn includes_crud(self) -> bool {
        matches!(self, Self::Crud | Self::Both)
    }

    pub const fn includes_auth(self) -> bool {
        matches!(self, Self::Auth | Self::Both)
    }
}

impl fmt::Display for ExampleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExampleSet {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "crud" => Ok(Self::Crud),
            "auth" => Ok(Self::Auth),
            "both" => Ok(Self::Both),
            "none" | "" => Ok(Self::None),
            other => Err(DomainError::UnknownValue {
                kind: "example set",
                value: other.into(),
            }),
        }
    }
}

// ── License ──────────────────────────────────────────────────────────────────

/// License file to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum License {
    Mit,
    Apache,
    #[default]
    None,
}

impl License {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mit => "mit",
            Self::Apache => "apache",
            Self::None => "none",
        }
    }

    /// SPDX identifier, if any.
    pub const fn spdx(&self) -> Option<&'static str> {
        match self {
            Self::Mit => Some("MIT"),
            Self::Apache => Some("Apache-2.0"),
            Self::None => None,
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for License {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mit" => Ok(Self::Mit),
            "apache" | "apache-2.0" => Ok(Self::Apache),
            "none" | "" => Ok(Self::None),
            other => Err(DomainError::UnknownValue {
                kind: "license",
                value: other.into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(cmd: CommandSpec) -> String {
        cmd.to_string()
    }

    #[test]
    fn empty_batch_is_a_plain_install() {
        let none: [&str; 0] = [];
        for pm in PackageManager::ALL {
            assert_eq!(
                render(pm.install_command(&none, false)),
                format!("{pm} install")
            );
            assert_eq!(
                render(pm.install_command(&none, true)),
                format!("{pm} install")
            );
        }
    }

    #[test]
    fn npm_installs_and_others_add() {
        let pkgs = ["axios", "zod"];
        assert_eq!(
            render(PackageManager::Npm.install_command(&pkgs, false)),
            "npm install axios zod"
        );
        assert_eq!(
            render(PackageManager::Pnpm.install_command(&pkgs, true)),
            "pnpm add -D axios zod"
        );
        assert_eq!(
            render(PackageManager::Yarn.install_command(&pkgs, false)),
            "yarn add axios zod"
        );
        assert_eq!(
            render(PackageManager::Bun.install_command(&pkgs, true)),
            "bun add -D axios zod"
        );
    }

    #[test]
    fn dlx_shapes() {
        assert_eq!(render(PackageManager::Npm.dlx_command()), "npx");
        assert_eq!(render(PackageManager::Yarn.dlx_command()), "npx");
        assert_eq!(render(PackageManager::Pnpm.dlx_command()), "pnpm dlx");
        assert_eq!(render(PackageManager::Bun.dlx_command()), "bun x");
    }

    #[test]
    fn user_agent_detection() {
        assert_eq!(
            PackageManager::from_user_agent("pnpm/9.1.0 npm/? node/v20.11.0 linux x64"),
            PackageManager::Pnpm
        );
        assert_eq!(
            PackageManager::from_user_agent("yarn/1.22.19 npm/? node/v18"),
            PackageManager::Yarn
        );
        assert_eq!(PackageManager::from_user_agent("bun/1.1.0"), PackageManager::Bun);
        assert_eq!(PackageManager::from_user_agent(""), PackageManager::Npm);
    }

    #[test]
    fn run_script_shapes() {
        assert_eq!(PackageManager::Npm.run_script("dev"), "npm run dev");
        assert_eq!(PackageManager::Bun.run_script("test"), "bun run test");
        assert_eq!(PackageManager::Pnpm.run_script("test"), "pnpm test");
    }

    #[test]
    fn parsers_accept_aliases_and_reject_unknown() {
        assert_eq!("HeroUI".parse::<UiKit>().unwrap(), UiKit::HeroUi);
        assert_eq!("authjs".parse::<AuthProvider>().unwrap(), AuthProvider::NextAuth);
        assert_eq!("Apache-2.0".parse::<License>().unwrap(), License::Apache);
        assert!(matches!(
            "mongoose".parse::<Orm>(),
            Err(DomainError::UnknownValue { kind: "orm", .. })
        ));
    }

    #[test]
    fn ui_kit_membership() {
        assert!(UiKit::Both.includes_shadcn() && UiKit::Both.includes_heroui());
        assert!(!UiKit::Shadcn.includes_heroui());
        assert!(!UiKit::None.includes_shadcn());
    }
}
