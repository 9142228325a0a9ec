//! Git hooks with Husky and lint-staged.

use nxtgen_core::{
    application::{Feature, FeatureContext},
    domain::{ProjectConfig, ScaffoldPlan},
    error::NxtgenResult,
};

pub struct Quality;

impl Feature for Quality {
    fn name(&self) -> &'static str {
        "quality"
    }

    fn description(&self) -> &'static str {
        "Setting up git hooks"
    }

    fn is_enabled(&self, config: &ProjectConfig) -> bool {
        config.husky
    }

    fn register(&self, _config: &ProjectConfig, plan: &mut ScaffoldPlan) {
        plan.dependencies_mut().add_dev_deps(["husky", "lint-staged"]);
    }

    fn apply(&self, ctx: &mut FeatureContext<'_>) -> NxtgenResult<()> {
        ctx.write_executable(".husky/pre-commit", "npx lint-staged\n")?;
        ctx.write(".lintstagedrc.json", LINT_STAGED)?;
        ctx.add_scripts(&[("prepare", "husky")])?;
        Ok(())
    }
}

const LINT_STAGED: &str = r#"{
  "*.{js,jsx,ts,tsx}": ["eslint --fix"]
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::test_support::*;

    #[test]
    fn hook_is_executable_and_prepare_script_added() {
        let config = ProjectConfig {
            husky: true,
            ..ProjectConfig::default()
        };
        let fs = generated();
        apply(&Quality, &config, &fs).unwrap();

        assert!(fs.is_executable(format!("{ROOT}/.husky/pre-commit")));
        assert!(read(&fs, "package.json").contains("\"prepare\": \"husky\""));
        let rc: serde_json::Value =
            serde_json::from_str(&read(&fs, ".lintstagedrc.json")).unwrap();
        assert!(rc.is_object());
    }
}
