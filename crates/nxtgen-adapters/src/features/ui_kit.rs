//! Component libraries: shadcn/ui helpers and HeroUI theming.
//!
//! HeroUI needs its Tailwind plugin registered. A Tailwind 3 project has a
//! JS config that the style-config mutator edits; when the generator wrote
//! none, a conventional config is created instead. Tailwind 4 stylesheets
//! (`@import "tailwindcss"`) additionally load the plugin from `hero.ts`
//! through a `@plugin` rule.

use nxtgen_core::{
    application::{Feature, FeatureContext, services::file_mutators::STYLE_CONFIG_CANDIDATES},
    domain::{ProjectConfig, ScaffoldPlan, StylePlugin, mutation::style_config},
    error::NxtgenResult,
};
use tracing::debug;

const TAILWIND_V4_IMPORTS: &[&str] = &["@import \"tailwindcss\";", "@import 'tailwindcss';"];

const HEROUI_CSS_MARKER: &str = "@plugin './hero.ts';";

const HEROUI_CSS_BLOCK: &str = r#"@import "tailwindcss";
@plugin './hero.ts';
@source '../../node_modules/@heroui/theme/dist/**/*.{js,ts,jsx,tsx}';
@custom-variant dark (&:is(.dark *));
"#;

pub struct UiKitFeature;

pub(crate) fn heroui_plugin() -> StylePlugin {
    StylePlugin {
        factory: "heroui".into(),
        module: "@heroui/react".into(),
        content_marker: "@heroui/theme".into(),
        content_glob: "./node_modules/@heroui/theme/dist/**/*.{js,ts,jsx,tsx}".into(),
    }
}

impl Feature for UiKitFeature {
    fn name(&self) -> &'static str {
        "ui-kit"
    }

    fn description(&self) -> &'static str {
        "Setting up the UI kit"
    }

    fn is_enabled(&self, config: &ProjectConfig) -> bool {
        config.ui.includes_shadcn() || config.ui.includes_heroui()
    }

    fn register(&self, config: &ProjectConfig, plan: &mut ScaffoldPlan) {
        let deps = plan.dependencies_mut();
        if config.ui.includes_shadcn() {
            deps.add_deps([
                "class-variance-authority",
                "clsx",
                "tailwind-merge",
                "lucide-react",
            ]);
        }
        if config.ui.includes_heroui() {
            deps.add_deps(["@heroui/react", "framer-motion"]);
        }
    }

    fn apply(&self, ctx: &mut FeatureContext<'_>) -> NxtgenResult<()> {
        let ui = ctx.config().ui;
        if ui.includes_shadcn() {
            ctx.write("src/lib/utils.ts", CN_UTIL)?;
        }
        if ui.includes_heroui() {
            configure_heroui(ctx)?;
        }
        Ok(())
    }
}

fn configure_heroui(ctx: &mut FeatureContext<'_>) -> NxtgenResult<()> {
    let plugin = heroui_plugin();

    if ctx.locate(STYLE_CONFIG_CANDIDATES).is_some() {
        ctx.register_style_plugin(&plugin)?;
    } else {
        debug!("No Tailwind config found, writing a conventional one");
        ctx.write("tailwind.config.ts", &style_config::conventional_config(&plugin))?;
    }

    let stylesheet = ctx
        .locate(&["src/app/globals.css"])
        .map(|path| ctx.read(path))
        .transpose()?;
    let tailwind_v4 = stylesheet
        .as_deref()
        .is_some_and(|css| TAILWIND_V4_IMPORTS.iter().any(|i| css.contains(i)));
    if tailwind_v4 {
        ctx.write("src/app/hero.ts", HERO_TS)?;
        ctx.ensure_global_css_block(HEROUI_CSS_BLOCK, HEROUI_CSS_MARKER, TAILWIND_V4_IMPORTS)?;
    }
    Ok(())
}

const CN_UTIL: &str = r#"import { type ClassValue, clsx } from "clsx";
import { twMerge } from "tailwind-merge";

export function cn(...inputs: ClassValue[]) {
  return twMerge(clsx(inputs));
}
"#;

const HERO_TS: &str = r#"import { heroui } from "@heroui/react";

export default heroui();
"#;
