//! Spinner-based progress reporting for `nxtgen new`.
//!
//! External commands (the generator, the package manager) write straight to
//! the terminal, so the spinner hides itself while one runs and comes back
//! on the next step.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;

use nxtgen_core::{application::ScaffoldObserver, domain::CommandSpec};

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"];

/// Observer that drives a stderr spinner. Cloning shares the same bar.
#[derive(Clone)]
pub struct ProgressObserver {
    bar: ProgressBar,
    color: bool,
}

impl ProgressObserver {
    pub fn new(color: bool) -> Self {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden());
        let style = ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS);
        bar.set_style(style);
        Self { bar, color }
    }

    /// Remove the spinner line.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    fn line(&self, text: String) {
        self.bar.suspend(|| eprintln!("{text}"));
    }
}

impl ScaffoldObserver for ProgressObserver {
    fn step_started(&self, step: &str) {
        self.bar.set_draw_target(ProgressDrawTarget::stderr());
        self.bar.set_message(step.to_string());
        self.bar.enable_steady_tick(Duration::from_millis(80));
    }

    fn step_finished(&self, step: &str) {
        let text = if self.color {
            format!("{} {step}", "\u{2713}".green().bold())
        } else {
            format!("\u{2713} {step}")
        };
        self.line(text);
    }

    fn command_started(&self, command: &CommandSpec) {
        let text = if self.color {
            format!("{} {}", "$".dimmed(), command.to_string().dimmed())
        } else {
            format!("$ {command}")
        };
        self.line(text);
        self.bar.disable_steady_tick();
        self.bar.set_draw_target(ProgressDrawTarget::hidden());
    }

    fn warning(&self, message: &str) {
        let text = if self.color {
            format!("{} {}", "\u{26a0}".yellow().bold(), message.yellow())
        } else {
            format!("\u{26a0} {message}")
        };
        self.line(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_on_a_hidden_bar_do_not_panic() {
        let observer = ProgressObserver::new(false);
        let clone = observer.clone();
        clone.command_started(&CommandSpec::new("npm").arg("install"));
        clone.warning("careful");
        observer.finish();
        assert!(observer.bar.is_finished());
    }
}
