//! Unit tests with Vitest and end-to-end tests with Playwright.

use nxtgen_core::{
    application::{Feature, FeatureContext},
    domain::{ProjectConfig, ScaffoldPlan},
    error::NxtgenResult,
};

pub struct Testing;

impl Feature for Testing {
    fn name(&self) -> &'static str {
        "testing"
    }

    fn description(&self) -> &'static str {
        "Setting up testing"
    }

    fn is_enabled(&self, config: &ProjectConfig) -> bool {
        config.vitest || config.playwright
    }

    fn register(&self, config: &ProjectConfig, plan: &mut ScaffoldPlan) {
        if config.vitest {
            plan.dependencies_mut().add_dev_deps([
                "vitest",
                "@vitejs/plugin-react",
                "jsdom",
                "@testing-library/react",
                "@testing-library/dom",
                "@testing-library/jest-dom",
            ]);
        }
        if config.playwright {
            plan.dependencies_mut().add_dev_dep("@playwright/test");
            plan.add_post_install("Installing Playwright browsers", ["playwright", "install"]);
        }
    }

    fn apply(&self, ctx: &mut FeatureContext<'_>) -> NxtgenResult<()> {
        let config = ctx.config();
        if config.vitest {
            ctx.write("vitest.config.mts", VITEST_CONFIG)?;
            ctx.write("vitest.setup.ts", VITEST_SETUP)?;
            ctx.write("__tests__/page.test.tsx", EXAMPLE_TEST)?;
            ctx.add_scripts(&[("test", "vitest")])?;
        }
        if config.playwright {
            ctx.write("playwright.config.ts", PLAYWRIGHT_CONFIG)?;
            ctx.write("e2e/example.spec.ts", EXAMPLE_E2E)?;
            ctx.add_scripts(&[("test:e2e", "playwright test")])?;
        }
        Ok(())
    }
}

const VITEST_CONFIG: &str = r#"import { defineConfig } from "vitest/config";
import react from "@vitejs/plugin-react";
import path from "path";

export default defineConfig({
  plugins: [react()],
  test: {
    environment: "jsdom",
    globals: true,
    setupFiles: "./vitest.setup.ts",
  },
  resolve: {
    alias: {
      "@": path.resolve(__dirname, "./src"),
    },
  },
});
"#;

const VITEST_SETUP: &str = "import \"@testing-library/jest-dom/vitest\";\n";

const EXAMPLE_TEST: &str = r#"import { render, screen } from "@testing-library/react";
import Page from "../src/app/page";

test("home page renders a heading", () => {
  render(<Page />);
  expect(screen.getByRole("heading")).toBeDefined();
});
"#;

const PLAYWRIGHT_CONFIG: &str = r#"import { defineConfig, devices } from "@playwright/test";

export default defineConfig({
  testDir: "./e2e",
  fullyParallel: true,
  forbidOnly: !!process.env.CI,
  retries: process.env.CI ? 2 : 0,
  workers: process.env.CI ? 1 : undefined,
  reporter: "html",
  use: {
    baseURL: "http://localhost:3000",
    trace: "on-first-retry",
  },
  projects: [
    { name: "chromium", use: { ...devices["Desktop Chrome"] } },
    { name: "firefox", use: { ...devices["Desktop Firefox"] } },
    { name: "webkit", use: { ...devices["Desktop Safari"] } },
  ],
  webServer: {
    command: "npm run dev",
    url: "http://localhost:3000",
    reuseExistingServer: !process.env.CI,
  },
});
"#;

const EXAMPLE_E2E: &str = r#"import { test, expect } from "@playwright/test";

test("home page has a heading", async ({ page }) => {
  await page.goto("/");
  await expect(page.getByRole("heading", { level: 1 })).toBeVisible();
});
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::test_support::*;
    use nxtgen_core::domain::PackageManager;

    fn both() -> ProjectConfig {
        ProjectConfig {
            vitest: true,
            playwright: true,
            ..ProjectConfig::default()
        }
    }

    #[test]
    fn scripts_and_post_install_are_registered() {
        let fs = generated();
        apply(&Testing, &both(), &fs).unwrap();

        let pkg: serde_json::Value = serde_json::from_str(&read(&fs, "package.json")).unwrap();
        assert_eq!(pkg["scripts"]["test"], "vitest");
        assert_eq!(pkg["scripts"]["test:e2e"], "playwright test");
        assert_eq!(pkg["scripts"]["dev"], "next dev");

        let plan = register(&Testing, &both());
        assert_eq!(
            plan.post_install()[0].command(PackageManager::Bun).to_string(),
            "bun x playwright install"
        );
        assert!(plan.dependencies().deps().is_empty());
    }

    #[test]
    fn existing_test_script_is_kept() {
        let fs = generated().with_file(
            format!("{ROOT}/package.json"),
            "{\n  \"scripts\": {\n    \"test\": \"jest\"\n  }\n}\n",
        );
        let config = ProjectConfig {
            vitest: true,
            ..ProjectConfig::default()
        };
        apply(&Testing, &config, &fs).unwrap();
        assert!(read(&fs, "package.json").contains("\"test\": \"jest\""));
    }
}
