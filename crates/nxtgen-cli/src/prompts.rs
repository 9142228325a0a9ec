//! Interactive questions for `nxtgen new`.
//!
//! Commands talk to a [`Prompter`] so that the question flow can run
//! against real terminal widgets or against fixed answers.

use crate::error::CliResult;

/// Source of answers for unset options.
pub trait Prompter {
    /// Pick one of `items`; returns its index.
    fn select(&self, prompt: &str, items: &[&str], default: usize) -> CliResult<usize>;

    fn confirm(&self, prompt: &str, default: bool) -> CliResult<bool>;

    fn input(&self, prompt: &str, default: &str) -> CliResult<String>;
}

/// Answers every question with its default.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultsOnly;

impl Prompter for DefaultsOnly {
    fn select(&self, _prompt: &str, _items: &[&str], default: usize) -> CliResult<usize> {
        Ok(default)
    }

    fn confirm(&self, _prompt: &str, default: bool) -> CliResult<bool> {
        Ok(default)
    }

    fn input(&self, _prompt: &str, default: &str) -> CliResult<String> {
        Ok(default.to_string())
    }
}

#[cfg(feature = "interactive")]
pub use terminal::TerminalPrompter;

#[cfg(feature = "interactive")]
mod terminal {
    use dialoguer::{Confirm, Input, Select, console::Term, theme::ColorfulTheme};

    use super::Prompter;
    use crate::error::{CliError, CliResult};

    /// `dialoguer` widgets on stderr. Esc cancels the whole run.
    pub struct TerminalPrompter {
        theme: ColorfulTheme,
        term: Term,
    }

    impl TerminalPrompter {
        pub fn new() -> Self {
            Self {
                theme: ColorfulTheme::default(),
                term: Term::stderr(),
            }
        }
    }

    impl Prompter for TerminalPrompter {
        fn select(&self, prompt: &str, items: &[&str], default: usize) -> CliResult<usize> {
            Select::with_theme(&self.theme)
                .with_prompt(prompt)
                .items(items)
                .default(default)
                .interact_on_opt(&self.term)
                .map_err(prompt_error)?
                .ok_or(CliError::Cancelled)
        }

        fn confirm(&self, prompt: &str, default: bool) -> CliResult<bool> {
            Confirm::with_theme(&self.theme)
                .with_prompt(prompt)
                .default(default)
                .interact_on_opt(&self.term)
                .map_err(prompt_error)?
                .ok_or(CliError::Cancelled)
        }

        fn input(&self, prompt: &str, default: &str) -> CliResult<String> {
            Input::<String>::with_theme(&self.theme)
                .with_prompt(prompt)
                .default(default.to_string())
                .interact_text_on(&self.term)
                .map_err(prompt_error)
        }
    }

    fn prompt_error(err: dialoguer::Error) -> CliError {
        CliError::IoError {
            message: "reading terminal input".into(),
            source: std::io::Error::other(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_only_returns_defaults() {
        let p = DefaultsOnly;
        assert_eq!(p.select("pm", &["npm", "pnpm"], 1).unwrap(), 1);
        assert!(p.confirm("docker?", true).unwrap());
        assert_eq!(p.input("name", "my-app").unwrap(), "my-app");
    }
}
