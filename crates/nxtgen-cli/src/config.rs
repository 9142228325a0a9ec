//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the [`ProjectConfig`]
//! and options derived from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `NXTGEN__DEFAULTS__ORM=prisma`
//! 3. `.nxtgen.toml` in the current directory
//! 4. User config file (or the file given with `--config`)
//! 5. Built-in defaults

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use nxtgen_core::domain::{PackageManager, ProjectConfig};

use crate::error::{CliError, CliResult};

pub const LOCAL_CONFIG_FILE: &str = ".nxtgen.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default answers for `nxtgen new`.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    pub generator: GeneratorConfig,
    pub license: LicenseConfig,
}

/// Feature defaults; any field of the project selection may appear here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Unset means: detect from `npm_config_user_agent`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<PackageManager>,
    #[serde(flatten)]
    pub project: ProjectConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// One of `auto`, `human`, `plain`, `json`.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Package passed to the dlx command, e.g. `create-next-app@15`.
    pub package: String,
    pub import_alias: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package: nxtgen_core::application::services::DEFAULT_GENERATOR.into(),
            import_alias: nxtgen_core::application::services::DEFAULT_IMPORT_ALIAS.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LicenseConfig {
    /// Copyright holder; the project name is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder: Option<String>,
}

impl AppConfig {
    /// Load configuration, layering files and environment over defaults.
    ///
    /// An explicit `config_file` must exist; the default locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        let user_file = config_file.cloned().unwrap_or_else(Self::config_path);
        Self::load_from(&user_file, config_file.is_some(), Path::new(LOCAL_CONFIG_FILE))
    }

    fn load_from(user_file: &Path, required: bool, local_file: &Path) -> CliResult<Self> {
        debug!(user = %user_file.display(), local = %local_file.display(), "Loading configuration");

        let defaults = Config::try_from(&Self::default()).map_err(config_error)?;
        Config::builder()
            .add_source(defaults)
            .add_source(File::from(user_file).required(required))
            .add_source(File::from(local_file).required(false))
            .add_source(
                Environment::with_prefix("NXTGEN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|c| c.try_deserialize::<Self>())
            .map_err(config_error)
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.nxtgen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "nxtgen", "nxtgen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Render as a TOML document.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: "could not serialize configuration".into(),
            source: Some(Box::new(e)),
        })
    }
}

fn config_error(err: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: err.to_string(),
        source: Some(Box::new(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nxtgen_core::domain::Orm;

    #[test]
    fn defaults_match_project_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.project, ProjectConfig::default());
        assert!(cfg.defaults.package_manager.is_none());
        assert_eq!(cfg.generator.package, "create-next-app@latest");
    }

    #[test]
    fn missing_optional_files_yield_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load_from(
            &dir.path().join("absent.toml"),
            false,
            &dir.path().join(LOCAL_CONFIG_FILE),
        )
        .unwrap();
        assert!(cfg.defaults.project.lucide);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load_from(
            &dir.path().join("absent.toml"),
            true,
            &dir.path().join(LOCAL_CONFIG_FILE),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn local_file_overrides_user_file() {
        let dir = tempfile::tempdir().unwrap();
        let user = dir.path().join("config.toml");
        let local = dir.path().join(LOCAL_CONFIG_FILE);
        std::fs::write(
            &user,
            "[defaults]\norm = \"drizzle\"\npackage_manager = \"pnpm\"\n",
        )
        .unwrap();
        std::fs::write(&local, "[defaults]\norm = \"prisma\"\nvitest = true\n").unwrap();

        let cfg = AppConfig::load_from(&user, true, &local).unwrap();
        assert_eq!(cfg.defaults.project.orm, Orm::Prisma);
        assert!(cfg.defaults.project.vitest);
        assert_eq!(cfg.defaults.package_manager, Some(PackageManager::Pnpm));
    }

    #[test]
    fn serialized_config_parses_back() {
        let mut cfg = AppConfig::default();
        cfg.license.holder = Some("Ada".into());
        let text = cfg.to_toml().unwrap();
        assert!(text.contains("[defaults]"));
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, cfg);
    }
}
