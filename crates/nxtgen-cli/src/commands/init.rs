//! `nxtgen init`: create a default configuration file.

use std::path::{Path, PathBuf};

use crate::{
    cli::InitArgs,
    config::{AppConfig, LOCAL_CONFIG_FILE},
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Write the built-in defaults as TOML, to the user config path or with
/// `--local` to `.nxtgen.toml` in the current directory.
pub fn execute(args: InitArgs, output: OutputManager) -> CliResult<()> {
    let path = if args.local {
        PathBuf::from(LOCAL_CONFIG_FILE)
    } else {
        AppConfig::config_path()
    };

    if write_default(&path, args.force)? {
        output.success(&format!("Configuration created at {}", path.display()))?;
    } else {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            path.display(),
        ))?;
    }
    Ok(())
}

/// Returns `false` when the file exists and `force` is off.
fn write_default(path: &Path, force: bool) -> CliResult<bool> {
    if path.exists() && !force {
        return Ok(false);
    }

    let toml = AppConfig::default().to_toml()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }
    std::fs::write(path, toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))?;
    Ok(true)
}
