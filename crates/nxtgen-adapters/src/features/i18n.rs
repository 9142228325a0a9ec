//! Internationalization with next-intl.

use nxtgen_core::{
    application::{Feature, FeatureContext},
    domain::{ProjectConfig, ScaffoldPlan},
    error::NxtgenResult,
};

pub struct I18n;

impl Feature for I18n {
    fn name(&self) -> &'static str {
        "i18n"
    }

    fn description(&self) -> &'static str {
        "Setting up internationalization"
    }

    fn is_enabled(&self, config: &ProjectConfig) -> bool {
        config.intl
    }

    fn register(&self, _config: &ProjectConfig, plan: &mut ScaffoldPlan) {
        plan.dependencies_mut().add_dep("next-intl");
    }

    fn apply(&self, ctx: &mut FeatureContext<'_>) -> NxtgenResult<()> {
        ctx.write("src/i18n/request.ts", REQUEST_CONFIG)?;
        ctx.write("messages/en.json", MESSAGES_EN)?;
        ctx.write("messages/de.json", MESSAGES_DE)
    }
}

const REQUEST_CONFIG: &str = r#"import { getRequestConfig } from "next-intl/server";

export default getRequestConfig(async () => {
  // Provide a static locale, or read it from cookies() or headers().
  const locale = "en";

  return {
    locale,
    messages: (await import(`../../messages/${locale}.json`)).default,
  };
});
"#;

const MESSAGES_EN: &str = r#"{
  "HomePage": {
    "title": "Hello world!",
    "about": "Go to the about page"
  }
}
"#;

const MESSAGES_DE: &str = r#"{
  "HomePage": {
    "title": "Hallo Welt!",
    "about": "Zur Über-uns-Seite"
  }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::test_support::*;

    #[test]
    fn message_catalogs_share_keys() {
        let config = ProjectConfig {
            intl: true,
            ..ProjectConfig::default()
        };
        let fs = generated();
        apply(&I18n, &config, &fs).unwrap();

        let en: serde_json::Value = serde_json::from_str(&read(&fs, "messages/en.json")).unwrap();
        let de: serde_json::Value = serde_json::from_str(&read(&fs, "messages/de.json")).unwrap();
        let keys = |v: &serde_json::Value| {
            v["HomePage"]
                .as_object()
                .map(|o| o.keys().cloned().collect::<Vec<_>>())
        };
        assert_eq!(keys(&en), keys(&de));
        assert!(read(&fs, "src/i18n/request.ts").contains("getRequestConfig"));
    }
}
