//! Replace the generator's landing page and drop its sample assets.

use nxtgen_core::{
    application::{Feature, FeatureContext},
    domain::ProjectConfig,
    error::NxtgenResult,
};

const SAMPLE_ASSETS: &[&str] = &["public/next.svg", "public/vercel.svg"];

pub struct Cleanup;

impl Feature for Cleanup {
    fn name(&self) -> &'static str {
        "cleanup"
    }

    fn description(&self) -> &'static str {
        "Cleaning up default files"
    }

    fn is_enabled(&self, _config: &ProjectConfig) -> bool {
        true
    }

    fn apply(&self, ctx: &mut FeatureContext<'_>) -> NxtgenResult<()> {
        let page = welcome_page(ctx.project().short_name());
        ctx.write("src/app/page.tsx", &page)?;
        for asset in SAMPLE_ASSETS {
            ctx.remove(asset)?;
        }
        Ok(())
    }
}

fn welcome_page(name: &str) -> String {
    format!(
        r#"export default function Home() {{
  return (
    <main className="flex min-h-screen flex-col items-center justify-center p-24">
      <h1 className="text-4xl font-bold">Welcome to {name}</h1>
    </main>
  );
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::test_support::*;
    use std::path::PathBuf;

    #[test]
    fn rewrites_page_and_removes_assets() {
        let fs = generated();
        let log = apply(&Cleanup, &ProjectConfig::default(), &fs).unwrap();

        assert!(read(&fs, "src/app/page.tsx").contains("Welcome to demo"));
        assert!(fs.read_file(format!("{ROOT}/public/next.svg")).is_none());
        assert_eq!(
            log.files_removed,
            vec![
                PathBuf::from("public/next.svg"),
                PathBuf::from("public/vercel.svg")
            ]
        );
    }

    #[test]
    fn missing_assets_are_ignored() {
        let fs = generated();
        apply(&Cleanup, &ProjectConfig::default(), &fs).unwrap();
        let log = apply(&Cleanup, &ProjectConfig::default(), &fs).unwrap();
        assert!(log.files_removed.is_empty());
    }
}
