//! Idempotent, structure-aware edits of generated project files.
//!
//! Every mutator is a pure function from file text to a [`Mutation`]: the new
//! text plus an outcome describing what happened. Running a mutator on its own
//! output yields [`MutationOutcome::Unchanged`].

pub mod global_css;
pub mod layout;
pub mod package_json;
pub mod style_config;

use serde::Serialize;

use crate::domain::source::{TextEdit, apply_edits};

pub use global_css::ensure_block;
pub use layout::{WrapperComponent, wrap_children};
pub use package_json::add_scripts;
pub use style_config::{StylePlugin, register_plugin};

/// Why a mutation did nothing, or only part of what was asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    FileMissing,
    NoDefaultExport,
    NoChildrenSlot,
    ConfigShapeUnrecognized,
    PluginsNotArray,
    ContentNotArray,
    ContentMissing,
    ScriptsNotObject,
}

impl SkipReason {
    pub fn describe(self) -> &'static str {
        match self {
            Self::FileMissing => "file not found",
            Self::NoDefaultExport => "no default-exported component function",
            Self::NoChildrenSlot => "no {children} slot in the returned JSX",
            Self::ConfigShapeUnrecognized => {
                "config is not `const config = { ... }; export default config`"
            }
            Self::PluginsNotArray => "`plugins` is not an array literal",
            Self::ContentNotArray => "`content` is not an array literal",
            Self::ContentMissing => "no `content` array; add the component globs by hand",
            Self::ScriptsNotObject => "`scripts` is not an object",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MutationOutcome {
    Applied { edits: Vec<String> },
    /// Some edits applied; the rest need manual attention.
    Partial { edits: Vec<String>, reason: SkipReason },
    Unchanged,
    Skipped { reason: SkipReason },
}

impl MutationOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, Self::Applied { .. } | Self::Partial { .. })
    }

    pub fn attention(&self) -> Option<SkipReason> {
        match self {
            Self::Partial { reason, .. } | Self::Skipped { reason } => Some(*reason),
            Self::Applied { .. } | Self::Unchanged => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub text: String,
    pub outcome: MutationOutcome,
}

impl Mutation {
    pub fn unchanged(src: &str) -> Self {
        Self {
            text: src.to_string(),
            outcome: MutationOutcome::Unchanged,
        }
    }

    pub fn skipped(src: &str, reason: SkipReason) -> Self {
        Self {
            text: src.to_string(),
            outcome: MutationOutcome::Skipped { reason },
        }
    }

    /// Apply collected edits and derive the outcome from what was done and
    /// what could not be.
    pub(crate) fn from_edits(
        src: &str,
        edits: Vec<(TextEdit, &str)>,
        reason: Option<SkipReason>,
    ) -> Self {
        let (edits, labels): (Vec<TextEdit>, Vec<String>) = edits
            .into_iter()
            .map(|(edit, label)| (edit, label.to_string()))
            .unzip();
        let text = apply_edits(src, &edits);
        let outcome = match (labels.is_empty(), reason) {
            (true, None) => MutationOutcome::Unchanged,
            (true, Some(reason)) => MutationOutcome::Skipped { reason },
            (false, None) => MutationOutcome::Applied { edits: labels },
            (false, Some(reason)) => MutationOutcome::Partial {
                edits: labels,
                reason,
            },
        };
        Self { text, outcome }
    }
}

/// `import { Name } from "module";` in the file's quote and semicolon style.
pub(crate) fn named_import(name: &str, module: &str, quote: char, semicolon: bool) -> String {
    let end = if semicolon { ";" } else { "" };
    format!("import {{ {name} }} from {quote}{module}{quote}{end}")
}
