//! Locate generated files and run the pure mutations from
//! `crate::domain::mutation` against them.
//!
//! A missing file is never an error: the outcome is `Skipped(FileMissing)`
//! and nothing is written. A file that cannot be tokenized fails with
//! `ApplicationError::MutationFailed` and is left untouched. Files are only
//! rewritten when their text actually changed.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{
        DomainError, Mutation, MutationOutcome, SkipReason, StylePlugin, WrapperComponent,
        mutation,
    },
    error::{NxtgenError, NxtgenResult},
};

pub const LAYOUT_CANDIDATES: &[&str] = &[
    "src/app/layout.tsx",
    "src/app/layout.jsx",
    "src/app/layout.js",
    "app/layout.tsx",
    "app/layout.jsx",
    "app/layout.js",
];

pub const STYLE_CONFIG_CANDIDATES: &[&str] = &[
    "tailwind.config.ts",
    "tailwind.config.mts",
    "tailwind.config.js",
    "tailwind.config.mjs",
];

pub const GLOBAL_CSS_CANDIDATES: &[&str] = &["src/app/globals.css", "app/globals.css"];

pub const PACKAGE_JSON: &str = "package.json";

/// Result of mutating one project file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMutation {
    /// Project-relative path, absent when no candidate exists.
    pub path: Option<PathBuf>,
    pub outcome: MutationOutcome,
}

/// Runs mutations against files under a project root.
pub struct FileMutator<'a> {
    filesystem: &'a dyn Filesystem,
    root: &'a Path,
}

impl<'a> FileMutator<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, root: &'a Path) -> Self {
        Self { filesystem, root }
    }

    /// First candidate that exists, relative to the root.
    pub fn locate(&self, candidates: &[&str]) -> Option<PathBuf> {
        candidates
            .iter()
            .map(PathBuf::from)
            .find(|rel| self.filesystem.exists(&self.root.join(rel)))
    }

    /// Layout mutator: wrap the root layout's `{children}` in `wrapper`.
    pub fn wrap_layout_children(&self, wrapper: &WrapperComponent) -> NxtgenResult<FileMutation> {
        self.apply(LAYOUT_CANDIDATES, |src| mutation::wrap_children(src, wrapper))
    }

    /// Style-config mutator: register a Tailwind plugin and its content glob.
    pub fn register_style_plugin(&self, plugin: &StylePlugin) -> NxtgenResult<FileMutation> {
        self.apply(STYLE_CONFIG_CANDIDATES, |src| {
            mutation::register_plugin(src, plugin)
        })
    }

    /// Ensure the global stylesheet contains `block`.
    pub fn ensure_global_css_block(
        &self,
        block: &str,
        marker: &str,
        anchors: &[&str],
    ) -> NxtgenResult<FileMutation> {
        self.apply(GLOBAL_CSS_CANDIDATES, |src| {
            Ok(mutation::ensure_block(src, block, marker, anchors))
        })
    }

    /// Add package.json scripts that are not defined yet.
    pub fn add_package_scripts(&self, scripts: &[(&str, &str)]) -> NxtgenResult<FileMutation> {
        self.apply(&[PACKAGE_JSON], |src| mutation::add_scripts(src, scripts))
    }

    fn apply(
        &self,
        candidates: &[&str],
        mutate: impl FnOnce(&str) -> Result<Mutation, DomainError>,
    ) -> NxtgenResult<FileMutation> {
        let Some(rel) = self.locate(candidates) else {
            debug!(candidates = ?candidates, "No file to mutate");
            return Ok(FileMutation {
                path: None,
                outcome: MutationOutcome::Skipped {
                    reason: SkipReason::FileMissing,
                },
            });
        };

        let path = self.root.join(&rel);
        let src = self.filesystem.read_to_string(&path)?;
        let result = mutate(&src).map_err(|e| match e {
            DomainError::SourceParse {
                line,
                column,
                reason,
            } => NxtgenError::from(ApplicationError::MutationFailed {
                path: rel.clone(),
                line,
                column,
                reason,
            }),
            other => other.into(),
        })?;

        if result.text != src {
            self.filesystem.write_file(&path, &result.text)?;
        }
        debug!(path = %rel.display(), outcome = ?result.outcome, "File mutated");

        Ok(FileMutation {
            path: Some(rel),
            outcome: result.outcome,
        })
    }
}
