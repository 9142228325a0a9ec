//! Dependency collection.
//!
//! Feature modules register the packages they need here instead of
//! installing them one by one. The installer drains the collector once and
//! issues at most one install per dependency class.

use std::collections::HashSet;

use serde::{Serialize, Serializer};

/// An insertion-ordered set of package identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a package; returns `false` if it was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.seen.contains(&name) {
            return false;
        }
        self.seen.insert(name.clone());
        self.order.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

impl Serialize for DependencySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.order)
    }
}

/// Runtime and development dependencies requested during one scaffold run.
///
/// The two sets are independent: a package added to both stays in both and
/// counts twice in [`DependencyCollector::total_count`]. Conflict resolution
/// is the installer's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyCollector {
    dependencies: DependencySet,
    dev_dependencies: DependencySet,
}

impl DependencyCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dep(&mut self, name: impl Into<String>) {
        self.dependencies.insert(name);
    }

    pub fn add_dev_dep(&mut self, name: impl Into<String>) {
        self.dev_dependencies.insert(name);
    }

    pub fn add_deps<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.add_dep(name);
        }
    }

    pub fn add_dev_deps<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.add_dev_dep(name);
        }
    }

    /// Runtime dependencies, in first-registration order.
    pub fn deps(&self) -> &[String] {
        self.dependencies.as_slice()
    }

    /// Development dependencies, in first-registration order.
    pub fn dev_deps(&self) -> &[String] {
        self.dev_dependencies.as_slice()
    }

    /// Both sequences, runtime first.
    pub fn all(&self) -> (&[String], &[String]) {
        (self.deps(), self.dev_deps())
    }

    pub fn runtime_set(&self) -> &DependencySet {
        &self.dependencies
    }

    pub fn dev_set(&self) -> &DependencySet {
        &self.dev_dependencies
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && self.dev_dependencies.is_empty()
    }

    pub fn total_count(&self) -> usize {
        self.dependencies.len() + self.dev_dependencies.len()
    }
}
