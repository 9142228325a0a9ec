//! Built-in feature modules.
//!
//! Each module implements [`Feature`] and owns its template bodies. The
//! order returned by [`builtin_features`] is the order features are applied
//! in: later modules may rely on files written by earlier ones (the
//! providers module imports the query provider written by data fetching,
//! the examples import the data layer client).

mod auth;
mod cleanup;
mod data_fetching;
mod data_layer;
mod devops;
mod docs;
mod examples;
mod extras;
mod forms;
mod i18n;
mod providers;
mod quality;
mod testing;
mod ui_kit;

use nxtgen_core::application::Feature;

pub use auth::Auth;
pub use cleanup::Cleanup;
pub use data_fetching::DataFetching;
pub use data_layer::DataLayer;
pub use devops::DevOps;
pub use docs::Docs;
pub use examples::Examples;
pub use extras::MotionAndIcons;
pub use forms::Forms;
pub use i18n::I18n;
pub use providers::Providers;
pub use quality::Quality;
pub use testing::Testing;
pub use ui_kit::UiKitFeature;

/// Every built-in feature, in application order.
pub fn builtin_features() -> Vec<Box<dyn Feature>> {
    vec![
        Box::new(Cleanup),
        Box::new(DataLayer),
        Box::new(DataFetching),
        Box::new(UiKitFeature),
        Box::new(MotionAndIcons),
        Box::new(Auth),
        Box::new(Forms),
        Box::new(I18n),
        Box::new(Testing),
        Box::new(Quality),
        Box::new(DevOps),
        Box::new(Examples),
        Box::new(Providers),
        Box::new(Docs),
    ]
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    use nxtgen_core::{
        application::{ApplyLog, Feature, FeatureContext, SilentObserver},
        domain::{PackageManager, ProjectConfig, ProjectName, ScaffoldPlan},
        error::NxtgenResult,
    };

    use crate::filesystem::MemoryFilesystem;

    pub(crate) const ROOT: &str = "/work/demo";

    pub(crate) const LAYOUT: &str = r#"import type { Metadata } from "next";
import "./globals.css";

export const metadata: Metadata = {
  title: "Create Next App",
};

export default function RootLayout({
  children,
}: Readonly<{
  children: React.ReactNode;
}>) {
  return (
    <html lang="en">
      <body className="antialiased">{children}</body>
    </html>
  );
}
"#;

    pub(crate) const PACKAGE_JSON: &str = "{\n  \"name\": \"demo\",\n  \"version\": \"0.1.0\",\n  \"private\": true,\n  \"scripts\": {\n    \"dev\": \"next dev\",\n    \"build\": \"next build\",\n    \"lint\": \"next lint\"\n  }\n}\n";

    pub(crate) const GLOBALS_V4: &str = "@import \"tailwindcss\";\n\n:root {\n  --background: #ffffff;\n}\n";

    /// A freshly generated project, as far as the features care.
    pub(crate) fn generated() -> MemoryFilesystem {
        MemoryFilesystem::new()
            .with_file(format!("{ROOT}/src/app/layout.tsx"), LAYOUT)
            .with_file(format!("{ROOT}/src/app/page.tsx"), "export default function Home() {}\n")
            .with_file(format!("{ROOT}/src/app/globals.css"), GLOBALS_V4)
            .with_file(format!("{ROOT}/package.json"), PACKAGE_JSON)
            .with_file(format!("{ROOT}/public/next.svg"), "<svg/>")
            .with_file(format!("{ROOT}/public/vercel.svg"), "<svg/>")
    }

    pub(crate) fn register(feature: &dyn Feature, config: &ProjectConfig) -> ScaffoldPlan {
        let mut plan = ScaffoldPlan::new();
        feature.register(config, &mut plan);
        plan
    }

    pub(crate) fn apply(
        feature: &dyn Feature,
        config: &ProjectConfig,
        fs: &MemoryFilesystem,
    ) -> NxtgenResult<ApplyLog> {
        let name = ProjectName::parse("demo")?;
        let root = Path::new(ROOT);
        let mut ctx = FeatureContext::new(
            root,
            &name,
            config,
            PackageManager::Npm,
            fs,
            &SilentObserver,
        )
        .with_license_holder(Some("Ada Lovelace"));
        feature.apply(&mut ctx)?;
        Ok(ctx.into_log())
    }

    pub(crate) fn read(fs: &MemoryFilesystem, rel: &str) -> String {
        fs.read_file(Path::new(ROOT).join(rel))
            .unwrap_or_else(|| panic!("{rel} was not written"))
    }
}
