use serde::Serialize;

use crate::domain::{
    entities::{command::CommandSpec, dependencies::DependencyCollector},
    value_objects::PackageManager,
};

/// A follow-up tool run after dependencies are installed, e.g. `prisma generate`.
///
/// Executed through the package manager's dlx prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostInstallStep {
    pub label: String,
    pub args: Vec<String>,
}

impl PostInstallStep {
    pub fn command(&self, pm: PackageManager) -> CommandSpec {
        pm.dlx_command().args(self.args.iter().cloned())
    }
}

/// Everything feature modules register before any file is touched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScaffoldPlan {
    features: Vec<String>,
    dependencies: DependencyCollector,
    post_install: Vec<PostInstallStep>,
}

impl ScaffoldPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_feature(&mut self, name: &str) {
        self.features.push(name.to_string());
    }

    pub fn dependencies(&self) -> &DependencyCollector {
        &self.dependencies
    }

    pub fn dependencies_mut(&mut self) -> &mut DependencyCollector {
        &mut self.dependencies
    }

    /// Register a post-install step; identical argument lists are kept once.
    pub fn add_post_install<I, S>(&mut self, label: impl Into<String>, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        if self.post_install.iter().any(|s| s.args == args) {
            return;
        }
        self.post_install.push(PostInstallStep {
            label: label.into(),
            args,
        });
    }

    pub fn post_install(&self) -> &[PostInstallStep] {
        &self.post_install
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_install_steps_are_deduplicated() {
        let mut plan = ScaffoldPlan::new();
        plan.add_post_install("Generating Prisma client", ["prisma", "generate"]);
        plan.add_post_install("again", ["prisma", "generate"]);
        plan.add_post_install("Installing browsers", ["playwright", "install"]);

        assert_eq!(plan.post_install().len(), 2);
        assert_eq!(
            plan.post_install()[1].command(PackageManager::Pnpm).to_string(),
            "pnpm dlx playwright install"
        );
    }
}
