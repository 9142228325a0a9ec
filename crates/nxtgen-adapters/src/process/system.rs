//! Runs commands as child processes with inherited stdio.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use nxtgen_core::{
    application::{ApplicationError, ports::CommandRunner},
    domain::CommandSpec,
    error::NxtgenResult,
};

/// Production runner. Blocks until the child exits; the child owns the
/// terminal while it runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    #[instrument(skip_all, fields(command = %command, cwd = %cwd.display()))]
    fn run(&self, command: &CommandSpec, cwd: &Path) -> NxtgenResult<()> {
        debug!("Spawning child process");
        let status = Command::new(program_name(&command.program))
            .args(&command.args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| ApplicationError::CommandSpawnFailed {
                program: command.program.clone(),
                reason: e.to_string(),
            })?;

        if status.success() {
            debug!("Child process exited successfully");
            Ok(())
        } else {
            Err(ApplicationError::CommandFailed {
                command: command.to_string(),
                status: status.to_string(),
            }
            .into())
        }
    }
}

/// Node package managers ship `.cmd` shims on Windows.
#[cfg(windows)]
fn program_name(program: &str) -> String {
    match program {
        "npm" | "npx" | "pnpm" | "yarn" => format!("{program}.cmd"),
        other => other.to_string(),
    }
}

#[cfg(not(windows))]
fn program_name(program: &str) -> String {
    program.to_string()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use nxtgen_core::error::NxtgenError;

    #[test]
    fn zero_exit_is_success() {
        let dir = tempfile::tempdir().unwrap();
        SystemCommandRunner::new()
            .run(&CommandSpec::new("true"), dir.path())
            .unwrap();
    }

    #[test]
    fn runs_in_the_given_directory() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = CommandSpec::new("sh").args(["-c", "touch marker"]);
        SystemCommandRunner::new().run(&cmd, dir.path()).unwrap();
        assert!(dir.path().join("marker").exists());
    }

    #[test]
    fn non_zero_exit_is_command_failed() {
        let dir = tempfile::tempdir().unwrap();
        let err = SystemCommandRunner::new()
            .run(&CommandSpec::new("false"), dir.path())
            .unwrap_err();
        assert!(matches!(
            err,
            NxtgenError::Application(ApplicationError::CommandFailed { .. })
        ));
    }

    #[test]
    fn missing_program_is_spawn_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = SystemCommandRunner::new()
            .run(&CommandSpec::new("nxtgen-no-such-binary"), dir.path())
            .unwrap_err();
        assert!(matches!(
            err,
            NxtgenError::Application(ApplicationError::CommandSpawnFailed { ref program, .. })
                if program == "nxtgen-no-such-binary"
        ));
    }
}
