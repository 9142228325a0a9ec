use serde::Serialize;

use super::{Mutation, SkipReason, named_import};
use crate::domain::{
    DomainError,
    source::{Dialect, SourceFile},
};

/// Conventional name of the exported config binding.
pub const CONFIG_BINDING: &str = "config";

/// A Tailwind plugin shipped by a component library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StylePlugin {
    /// Factory function, registered as `factory()`.
    pub factory: String,
    pub module: String,
    /// Substring identifying the library's entry in `content`.
    pub content_marker: String,
    pub content_glob: String,
}

/// Ensure the config imports the plugin, registers it under `plugins` and
/// scans its theme assets via `content`.
///
/// Only `const config = { ... }; export default config` is edited
/// structurally. Other ES module shapes get the import at most and report
/// [`SkipReason::ConfigShapeUnrecognized`]. CommonJS configs are left
/// untouched, since an `import` line would stop them from loading.
pub fn register_plugin(src: &str, plugin: &StylePlugin) -> Result<Mutation, DomainError> {
    let file = SourceFile::parse(src, Dialect::Script)?;
    if file.uses_commonjs() || !file.has_default_export() {
        return Ok(Mutation::skipped(src, SkipReason::ConfigShapeUnrecognized));
    }

    let quote = file.preferred_quote();
    let mut edits = Vec::new();

    let statement = named_import(&plugin.factory, &plugin.module, quote, file.uses_semicolons());
    if let Some(edit) = file.named_import_edit(&plugin.factory, &plugin.module, &statement) {
        edits.push((edit, "add plugin import"));
    }

    let object = match file.object_binding(CONFIG_BINDING) {
        Some(object) if file.default_exports_binding(CONFIG_BINDING) => object,
        _ => {
            return Ok(Mutation::from_edits(
                src,
                edits,
                Some(SkipReason::ConfigShapeUnrecognized),
            ));
        }
    };

    let call = format!("{}()", plugin.factory);
    let invocation = format!("{}(", plugin.factory);
    let mut reason = None;

    match object.property("plugins") {
        Some(property) => match file.array_value(property) {
            Some(plugins) => {
                let registered = plugins
                    .elements
                    .iter()
                    .any(|e| e.text(src).contains(&invocation));
                if !registered {
                    edits.push((file.append_element(&plugins, &call), "register plugin"));
                }
            }
            None => reason = Some(SkipReason::PluginsNotArray),
        },
        None => {
            edits.push((
                file.append_property(&object, &format!("plugins: [{call}]")),
                "add plugins",
            ));
        }
    }

    match object.property("content") {
        Some(property) => match file.array_value(property) {
            Some(content) => {
                let scanned = content
                    .elements
                    .iter()
                    .any(|e| e.text(src).contains(&plugin.content_marker));
                if !scanned {
                    let q = content
                        .elements
                        .first()
                        .and_then(|e| e.text(src).chars().next())
                        .filter(|c| *c == '"' || *c == '\'')
                        .unwrap_or(quote);
                    let glob = format!("{q}{}{q}", plugin.content_glob);
                    edits.push((file.append_element(&content, &glob), "add content glob"));
                }
            }
            None => {
                reason.get_or_insert(SkipReason::ContentNotArray);
            }
        },
        None => {
            reason.get_or_insert(SkipReason::ContentMissing);
        }
    }

    Ok(Mutation::from_edits(src, edits, reason))
}

/// A complete conventional config registering `plugin`, for projects that
/// have no Tailwind config file at all.
pub fn conventional_config(plugin: &StylePlugin) -> String {
    format!(
        r#"import type {{ Config }} from "tailwindcss";
import {{ {factory} }} from "{module}";

const config: Config = {{
  content: [
    "./src/pages/**/*.{{js,ts,jsx,tsx,mdx}}",
    "./src/components/**/*.{{js,ts,jsx,tsx,mdx}}",
    "./src/app/**/*.{{js,ts,jsx,tsx,mdx}}",
    "{glob}",
  ],
  darkMode: "class",
  theme: {{
    extend: {{}},
  }},
  plugins: [{factory}()],
}};

export default config;
"#,
        factory = plugin.factory,
        module = plugin.module,
        glob = plugin.content_glob,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mutation::MutationOutcome;

    fn heroui() -> StylePlugin {
        StylePlugin {
            factory: "heroui".into(),
            module: "@heroui/react".into(),
            content_marker: "@heroui/theme".into(),
            content_glob: "./node_modules/@heroui/theme/dist/**/*.{js,ts,jsx,tsx}".into(),
        }
    }

    const CONVENTIONAL: &str = r#"import type { Config } from "tailwindcss";

const config: Config = {
  content: ["./src/**/*"],
  theme: {
    extend: {},
  },
  plugins: [],
};
export default config;
"#;

    #[test]
    fn registers_plugin_and_glob() {
        let m = register_plugin(CONVENTIONAL, &heroui()).unwrap();
        assert!(m.text.contains(
            "import type { Config } from \"tailwindcss\";\nimport { heroui } from \"@heroui/react\";\n"
        ));
        assert!(m.text.contains("plugins: [heroui()],"));
        assert!(m.text.contains(
            "content: [\"./src/**/*\", \"./node_modules/@heroui/theme/dist/**/*.{js,ts,jsx,tsx}\"],"
        ));
        assert!(matches!(m.outcome, MutationOutcome::Applied { .. }));
    }

    #[test]
    fn second_run_changes_nothing() {
        let once = register_plugin(CONVENTIONAL, &heroui()).unwrap();
        let twice = register_plugin(&once.text, &heroui()).unwrap();
        assert_eq!(twice.text, once.text);
        assert_eq!(twice.outcome, MutationOutcome::Unchanged);
        assert_eq!(twice.text.matches("heroui()").count(), 1);
        assert_eq!(twice.text.matches("@heroui/theme").count(), 1);
    }

    #[test]
    fn adds_missing_plugins_property_last() {
        let src = "const config = {\n  content: [\"./app/**/*.tsx\"],\n  theme: { extend: {} },\n};\n\nexport default config;\n";
        let m = register_plugin(src, &heroui()).unwrap();
        assert!(m.text.contains(
            "  theme: { extend: {} },\n  plugins: [heroui()],\n};"
        ));
        assert!(m.text.starts_with("import { heroui } from \"@heroui/react\";\n"));
        let content = m.text.find("content:").unwrap();
        let theme = m.text.find("theme:").unwrap();
        assert!(content < theme);
    }

    #[test]
    fn existing_plugins_are_kept() {
        let src = "import typography from '@tailwindcss/typography'\n\nconst config = {\n  content: ['./src/**/*'],\n  plugins: [typography],\n}\nexport default config\n";
        let m = register_plugin(src, &heroui()).unwrap();
        assert!(m.text.contains("plugins: [typography, heroui()],"));
        assert!(m.text.contains("'./src/**/*', './node_modules/@heroui/theme"));
        assert!(m.text.contains("import { heroui } from '@heroui/react'\n"));
    }

    #[test]
    fn unrecognized_shape_only_adds_import() {
        let src = "export default {\n  plugins: [],\n};\n";
        let m = register_plugin(src, &heroui()).unwrap();
        assert!(m.text.contains("import { heroui }"));
        assert!(m.text.contains("plugins: [],"));
        assert_eq!(
            m.outcome.attention(),
            Some(SkipReason::ConfigShapeUnrecognized)
        );

        let again = register_plugin(&m.text, &heroui()).unwrap();
        assert_eq!(again.text, m.text);
        assert_eq!(
            again.outcome,
            MutationOutcome::Skipped {
                reason: SkipReason::ConfigShapeUnrecognized
            }
        );
    }

    #[test]
    fn commonjs_config_is_left_alone() {
        for src in [
            "module.exports = {\n  content: [\"./src/**/*\"],\n  plugins: [],\n};\n",
            "const forms = require(\"@tailwindcss/forms\");\n\nconst config = { plugins: [forms] };\nmodule.exports = config;\n",
            "const config = { plugins: [] };\n",
        ] {
            let m = register_plugin(src, &heroui()).unwrap();
            assert_eq!(m.text, src);
            assert_eq!(
                m.outcome,
                MutationOutcome::Skipped {
                    reason: SkipReason::ConfigShapeUnrecognized
                }
            );
        }
    }

    #[test]
    fn aliased_factory_import_still_gets_the_bare_name() {
        let src = "import { heroui as hero } from \"@heroui/react\";\n\nconst config = {\n  content: [],\n  plugins: [hero({})],\n};\nexport default config;\n";
        let m = register_plugin(src, &heroui()).unwrap();
        assert!(m.text.starts_with("import { heroui as hero, heroui } from \"@heroui/react\";\n"));
        assert!(m.text.contains("plugins: [hero({}), heroui()],"));

        let again = register_plugin(&m.text, &heroui()).unwrap();
        assert_eq!(again.text, m.text);
    }

    #[test]
    fn comment_only_plugins_array_gets_its_own_line() {
        let src = "const config = {\n  content: [\"./node_modules/@heroui/theme/dist/**/*\"],\n  plugins: [\n    // none yet\n  ],\n};\nexport default config;\n";
        let m = register_plugin(src, &heroui()).unwrap();
        assert!(m.text.contains("  plugins: [\n    // none yet\n    heroui()\n  ],\n"));
    }

    #[test]
    fn missing_content_is_reported() {
        let src = "const config = { plugins: [] };\nexport default config;\n";
        let m = register_plugin(src, &heroui()).unwrap();
        assert!(m.text.contains("plugins: [heroui()]"));
        assert!(!m.text.contains("@heroui/theme"));
        assert_eq!(m.outcome.attention(), Some(SkipReason::ContentMissing));
    }

    #[test]
    fn conventional_config_is_already_registered() {
        let fresh = conventional_config(&heroui());
        let m = register_plugin(&fresh, &heroui()).unwrap();
        assert_eq!(m.outcome, MutationOutcome::Unchanged);
    }
}
