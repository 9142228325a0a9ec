//! Animation and icon packages. Nothing to write, only dependencies.

use nxtgen_core::{
    application::{Feature, FeatureContext},
    domain::{ProjectConfig, ScaffoldPlan},
    error::NxtgenResult,
};

pub struct MotionAndIcons;

impl Feature for MotionAndIcons {
    fn name(&self) -> &'static str {
        "motion-icons"
    }

    fn description(&self) -> &'static str {
        "Adding animation and icon libraries"
    }

    fn is_enabled(&self, config: &ProjectConfig) -> bool {
        config.framer_motion || config.lucide
    }

    fn register(&self, config: &ProjectConfig, plan: &mut ScaffoldPlan) {
        if config.framer_motion {
            plan.dependencies_mut().add_dep("framer-motion");
        }
        if config.lucide {
            plan.dependencies_mut().add_dep("lucide-react");
        }
    }

    fn apply(&self, _ctx: &mut FeatureContext<'_>) -> NxtgenResult<()> {
        Ok(())
    }
}
