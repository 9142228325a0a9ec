//! Integration tests for the `nxtgen` binary.
//!
//! Every test runs in its own temporary HOME and working directory so that
//! neither the user's config nor the invoking package manager leak in.
//! Nothing here reaches the network: scaffolding is either a dry run or
//! stops before the generator runs.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn nxtgen(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("nxtgen").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("npm_config_user_agent")
        .env_remove("RUST_LOG");
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    nxtgen(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_flag() {
    let home = TempDir::new().unwrap();
    nxtgen(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn new_help_shows_feature_flags() {
    let home = TempDir::new().unwrap();
    nxtgen(home.path())
        .args(["new", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--react-query"))
        .stdout(predicate::str::contains("--orm"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn no_color_env_accepts_any_value() {
    let home = TempDir::new().unwrap();
    for value in ["1", "true", "yes", "0", ""] {
        nxtgen(home.path())
            .env("NO_COLOR", value)
            .args(["list", "--format", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("cleanup"));
    }

    nxtgen(home.path())
        .env("NO_COLOR", "1")
        .args(["--no-color", "list"])
        .assert()
        .success();
}

#[test]
fn list_table_and_json() {
    let home = TempDir::new().unwrap();
    nxtgen(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("cleanup"))
        .stdout(predicate::str::contains("providers"));

    let features = json_stdout(nxtgen(home.path()).args(["list", "--format", "json"]));
    let names: Vec<&str> = features
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.first(), Some(&"cleanup"));
    assert_eq!(names.last(), Some(&"docs"));
    assert_eq!(names.len(), 14);
}

#[test]
fn dry_run_prints_the_plan_without_writing() {
    let home = TempDir::new().unwrap();
    nxtgen(home.path())
        .args(["new", "demo", "--yes", "--dry-run", "--orm", "prisma"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run: would create 'demo'"))
        .stdout(predicate::str::contains("@prisma/client"))
        .stdout(predicate::str::contains("$ npx prisma generate"));

    assert!(!home.path().join("demo").exists());
}

#[test]
fn dry_run_json_reflects_flags() {
    let home = TempDir::new().unwrap();
    let preview = json_stdout(nxtgen(home.path()).args([
        "--output-format",
        "json",
        "new",
        "shop",
        "--yes",
        "--dry-run",
        "--pm",
        "pnpm",
        "--orm",
        "drizzle",
        "--vitest",
    ]));

    assert_eq!(preview["project"], "shop");
    assert_eq!(preview["package_manager"], "pnpm");
    let features = preview["features"].as_array().unwrap();
    assert!(features.iter().any(|f| f == "data-layer"));
    assert!(features.iter().any(|f| f == "testing"));
    assert!(preview["dev_dependencies"]
        .as_array()
        .unwrap()
        .iter()
        .any(|d| d == "drizzle-kit"));
    assert!(preview["generator"]
        .as_str()
        .unwrap()
        .starts_with("pnpm dlx create-next-app@latest shop"));
}

#[test]
fn local_config_and_env_supply_defaults() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join(".nxtgen.toml"),
        "[defaults]\norm = \"prisma\"\npackage_manager = \"bun\"\n",
    )
    .unwrap();

    let preview = json_stdout(
        nxtgen(home.path())
            .env("NXTGEN__DEFAULTS__DOCKER", "true")
            .args(["--output-format", "json", "new", "demo", "-y", "--dry-run"]),
    );
    assert_eq!(preview["package_manager"], "bun");
    assert!(preview["dependencies"]
        .as_array()
        .unwrap()
        .iter()
        .any(|d| d == "@prisma/client"));
    assert!(preview["features"].as_array().unwrap().iter().any(|f| f == "devops"));
}

#[test]
fn user_agent_picks_the_package_manager() {
    let home = TempDir::new().unwrap();
    let preview = json_stdout(
        nxtgen(home.path())
            .env("npm_config_user_agent", "yarn/4.1.0 npm/? node/v20.11.0")
            .args(["--output-format", "json", "new", "demo", "--yes", "--dry-run"]),
    );
    assert_eq!(preview["package_manager"], "yarn");
}

#[test]
fn completions_bash() {
    let home = TempDir::new().unwrap();
    nxtgen(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete"));
}

#[test]
fn init_local_then_refuses_without_force() {
    let home = TempDir::new().unwrap();
    nxtgen(home.path())
        .args(["init", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration created"));
    let written = std::fs::read_to_string(home.path().join(".nxtgen.toml")).unwrap();
    assert!(written.contains("[defaults]"));

    nxtgen(home.path())
        .args(["init", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn config_set_then_get() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("nxtgen.toml");
    std::fs::write(&file, "").unwrap();
    let file_arg = file.to_str().unwrap();

    nxtgen(home.path())
        .args(["--config", file_arg, "config", "set", "defaults.orm", "drizzle"])
        .assert()
        .success();

    nxtgen(home.path())
        .args(["--config", file_arg, "config", "get", "defaults.orm"])
        .assert()
        .success()
        .stdout(predicate::str::diff("drizzle\n"));

    nxtgen(home.path())
        .args(["--config", file_arg, "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nxtgen.toml"));
}
