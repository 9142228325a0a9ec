//! A runner that records commands instead of executing them.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use nxtgen_core::{
    application::{ApplicationError, ports::CommandRunner},
    domain::CommandSpec,
    error::NxtgenResult,
};

type Effect = dyn Fn(&CommandSpec, &Path) + Send + Sync;

/// Records every command with its working directory.
///
/// Commands whose rendered text contains a `fail_on` pattern fail with
/// `CommandFailed`. An optional effect runs for every successful command, so
/// tests can simulate what a generator would have written.
#[derive(Clone, Default)]
pub struct RecordingRunner {
    calls: Arc<Mutex<Vec<(String, PathBuf)>>>,
    fail_on: Vec<String>,
    effect: Option<Arc<Effect>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(mut self, pattern: impl Into<String>) -> Self {
        self.fail_on.push(pattern.into());
        self
    }

    pub fn with_effect(
        mut self,
        effect: impl Fn(&CommandSpec, &Path) + Send + Sync + 'static,
    ) -> Self {
        self.effect = Some(Arc::new(effect));
        self
    }

    /// Rendered commands in call order.
    pub fn commands(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|(command, _)| command)
            .collect()
    }

    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for RecordingRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingRunner")
            .field("calls", &self.calls())
            .field("fail_on", &self.fail_on)
            .finish_non_exhaustive()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &CommandSpec, cwd: &Path) -> NxtgenResult<()> {
        let rendered = command.to_string();
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((rendered.clone(), cwd.to_path_buf()));
        }

        if self.fail_on.iter().any(|p| rendered.contains(p.as_str())) {
            return Err(ApplicationError::CommandFailed {
                command: rendered,
                status: "exit status: 1".into(),
            }
            .into());
        }

        if let Some(effect) = &self.effect {
            effect(command, cwd);
        }
        Ok(())
    }
}
