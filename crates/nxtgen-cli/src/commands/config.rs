//! `nxtgen config`: read and write configuration values.
//!
//! Keys are dotted paths into the TOML document, e.g. `defaults.orm` or
//! `license.holder`.

use std::path::Path;

use toml::{Table, Value};

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Keys that are valid but absent from the defaults because they are unset.
const OPTIONAL_KEYS: &[&str] = &["defaults.package_manager", "license.holder"];

/// Dispatch to the correct config subcommand.
///
/// `set` writes to `config_file` (the `--config` path or the user file).
pub fn execute(
    cmd: ConfigCommands,
    config: AppConfig,
    config_file: &Path,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let document = to_value(&config)?;
            let value = lookup(&document, &key).ok_or(CliError::UnknownConfigKey { key })?;
            output.print(&display_value(value))?;
        }

        ConfigCommands::Set { key, value } => {
            set_in_file(config_file, &key, &value)?;
            output.success(&format!("{key} = {value} ({})", config_file.display()))?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                output.print(config.to_toml()?.trim_end())?;
            }
        }

        ConfigCommands::Path => {
            output.print(&config_file.display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn to_value(config: &AppConfig) -> CliResult<Value> {
    Value::try_from(config).map_err(|e| CliError::ConfigError {
        message: "could not serialize configuration".into(),
        source: Some(Box::new(e)),
    })
}

fn lookup<'v>(document: &'v Value, key: &str) -> Option<&'v Value> {
    key.split('.')
        .try_fold(document, |value, part| value.as_table()?.get(part))
}

/// Strings print bare; everything else in TOML syntax.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Table(table) => toml::to_string_pretty(table)
            .unwrap_or_default()
            .trim_end()
            .to_string(),
        other => other.to_string(),
    }
}

/// `true`/`false` and integers keep their type; everything else is a string.
fn parse_value(raw: &str) -> Value {
    if let Ok(b) = raw.parse::<bool>() {
        Value::Boolean(b)
    } else if let Ok(n) = raw.parse::<i64>() {
        Value::Integer(n)
    } else {
        Value::String(raw.to_string())
    }
}

fn is_known_key(key: &str) -> CliResult<bool> {
    if OPTIONAL_KEYS.contains(&key) {
        return Ok(true);
    }
    let defaults = to_value(&AppConfig::default())?;
    Ok(lookup(&defaults, key).is_some_and(|v| !v.is_table()))
}

fn set_in_file(path: &Path, key: &str, raw: &str) -> CliResult<()> {
    if !is_known_key(key)? {
        return Err(CliError::UnknownConfigKey { key: key.into() });
    }

    let mut document: Table = if path.exists() {
        let text = std::fs::read_to_string(path)
            .with_cli_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&text).with_cli_context(|| format!("{} is not valid TOML", path.display()))?
    } else {
        Table::new()
    };

    let mut parts: Vec<&str> = key.split('.').collect();
    let leaf = parts.pop().unwrap_or(key);
    let mut table = &mut document;
    for part in parts {
        let entry = table
            .entry(part.to_string())
            .or_insert_with(|| Value::Table(Table::new()));
        table = entry.as_table_mut().ok_or_else(|| CliError::ConfigError {
            message: format!("'{part}' in {} is not a table", path.display()),
            source: None,
        })?;
    }
    table.insert(leaf.to_string(), parse_value(raw));

    let text = toml::to_string_pretty(&document).map_err(|e| CliError::ConfigError {
        message: "could not serialize configuration".into(),
        source: Some(Box::new(e)),
    })?;
    // Reject values the loader would choke on, e.g. `defaults.orm = "mongo"`.
    toml::from_str::<AppConfig>(&text)
        .with_cli_context(|| format!("Invalid value '{raw}' for {key}"))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, text).with_cli_context(|| format!("Failed to write {}", path.display()))
}

// ── tests ─────────────────────────────────────────────────────────────────────
