//! Client-side provider composition for the root layout.

use nxtgen_core::{
    application::{Feature, FeatureContext},
    domain::{AuthProvider, ProjectConfig, WrapperComponent},
    error::NxtgenResult,
};

use super::data_fetching::QUERY_PROVIDER_PATH;

const PROVIDERS_PATH: &str = "src/components/providers.tsx";

pub struct Providers;

impl Feature for Providers {
    fn name(&self) -> &'static str {
        "providers"
    }

    fn description(&self) -> &'static str {
        "Wiring providers into the layout"
    }

    fn is_enabled(&self, config: &ProjectConfig) -> bool {
        config.needs_providers()
    }

    fn apply(&self, ctx: &mut FeatureContext<'_>) -> NxtgenResult<()> {
        let config = ctx.config();
        if config.react_query && !ctx.exists(QUERY_PROVIDER_PATH) {
            ctx.warn(format!("{QUERY_PROVIDER_PATH} is missing; Providers will not compile"));
        }
        ctx.write(PROVIDERS_PATH, &compose(config))?;
        ctx.wrap_layout(&WrapperComponent::new("Providers", "@/components/providers"))?;
        Ok(())
    }
}

/// Outermost first.
fn layers(config: &ProjectConfig) -> Vec<(&'static str, &'static str)> {
    let mut layers = Vec::new();
    if config.auth == AuthProvider::NextAuth {
        layers.push(("SessionProvider", "import { SessionProvider } from 'next-auth/react';"));
    }
    if config.react_query {
        layers.push((
            "QueryProvider",
            "import QueryProvider from '@/components/providers/query-provider';",
        ));
    }
    if config.ui.includes_heroui() {
        layers.push(("HeroUIProvider", "import { HeroUIProvider } from '@heroui/react';"));
    }
    layers
}

fn compose(config: &ProjectConfig) -> String {
    let layers = layers(config);

    let mut out = String::from("'use client';\n\n");
    for (_, import) in &layers {
        out.push_str(import);
        out.push('\n');
    }
    out.push_str(
        "\nexport function Providers({ children }: { children: React.ReactNode }) {\n  return (\n",
    );

    let depth = layers.len();
    for (i, (name, _)) in layers.iter().enumerate() {
        out.push_str(&format!("{}<{name}>\n", indent(i)));
    }
    out.push_str(&format!("{}{{children}}\n", indent(depth)));
    for (i, (name, _)) in layers.iter().enumerate().rev() {
        out.push_str(&format!("{}</{name}>\n", indent(i)));
    }
    out.push_str("  );\n}\n");
    out
}

fn indent(level: usize) -> String {
    " ".repeat(4 + level * 2)
}
