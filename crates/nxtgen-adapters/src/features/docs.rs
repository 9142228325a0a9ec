//! README, LICENSE and Storybook initialization.

use std::fmt::Write as _;

use chrono::Datelike;
use nxtgen_core::{
    application::{Feature, FeatureContext},
    domain::{AuthProvider, License, Orm, PackageManager, ProjectConfig, ScaffoldPlan},
    error::NxtgenResult,
};

pub struct Docs;

impl Feature for Docs {
    fn name(&self) -> &'static str {
        "docs"
    }

    fn description(&self) -> &'static str {
        "Writing documentation"
    }

    fn is_enabled(&self, _config: &ProjectConfig) -> bool {
        true
    }

    fn register(&self, config: &ProjectConfig, plan: &mut ScaffoldPlan) {
        if config.storybook {
            plan.add_post_install(
                "Initializing Storybook",
                ["storybook@latest", "init", "--yes"],
            );
        }
    }

    fn apply(&self, ctx: &mut FeatureContext<'_>) -> NxtgenResult<()> {
        let config = ctx.config();
        let name = ctx.project().short_name();
        let readme = readme(name, ctx.package_manager(), config);
        ctx.write("README.md", &readme)?;

        if config.license != License::None {
            let holder = ctx.license_holder().unwrap_or(name);
            let year = chrono::Local::now().year();
            ctx.write("LICENSE", &license_text(config.license, year, holder))?;
        }
        Ok(())
    }
}

// ── README ───────────────────────────────────────────────────────────────────

fn stack_rows(config: &ProjectConfig) -> Vec<(&'static str, &'static str, &'static str)> {
    let mut rows = vec![
        ("Framework", "[Next.js](https://nextjs.org/)", "The React framework for the web"),
        ("Language", "[TypeScript](https://www.typescriptlang.org/)", "JavaScript with types"),
        ("Styling", "[Tailwind CSS](https://tailwindcss.com/)", "Utility-first CSS"),
    ];
    if config.ui.includes_shadcn() {
        rows.push(("UI", "[shadcn/ui](https://ui.shadcn.com/)", "Copy-in components"));
    }
    if config.ui.includes_heroui() {
        rows.push(("UI", "[HeroUI](https://heroui.com/)", "Accessible component library"));
    }
    if config.lucide {
        rows.push(("Icons", "[Lucide](https://lucide.dev/)", "Consistent icon set"));
    }
    if config.framer_motion {
        rows.push(("Animation", "[Framer Motion](https://motion.dev/)", "Production-ready animation"));
    }
    if config.react_query {
        rows.push(("Data", "[TanStack Query](https://tanstack.com/query)", "Async state management"));
    }
    if config.axios {
        rows.push(("HTTP", "[Axios](https://axios-http.com/)", "Promise-based HTTP client"));
    }
    if config.orval {
        rows.push(("API client", "[Orval](https://orval.dev/)", "Client generation from OpenAPI"));
    }
    match config.orm {
        Orm::Prisma => rows.push(("ORM", "[Prisma](https://www.prisma.io/)", "Type-safe ORM over SQLite")),
        Orm::Drizzle => rows.push(("ORM", "[Drizzle](https://orm.drizzle.team/)", "SQL-first ORM over libSQL")),
        Orm::None => {}
    }
    match config.auth {
        AuthProvider::NextAuth => rows.push(("Auth", "[Auth.js](https://authjs.dev/)", "Authentication for Next.js")),
        AuthProvider::Clerk => rows.push(("Auth", "[Clerk](https://clerk.com/)", "Hosted user management")),
        AuthProvider::None => {}
    }
    if config.forms {
        rows.push(("Forms", "[React Hook Form](https://react-hook-form.com/) + [Zod](https://zod.dev/)", "Forms with schema validation"));
    }
    if config.intl {
        rows.push(("i18n", "[next-intl](https://next-intl.dev/)", "Internationalization"));
    }
    if config.vitest {
        rows.push(("Unit tests", "[Vitest](https://vitest.dev/)", "Fast unit testing"));
    }
    if config.playwright {
        rows.push(("E2E tests", "[Playwright](https://playwright.dev/)", "End-to-end testing"));
    }
    if config.storybook {
        rows.push(("Components", "[Storybook](https://storybook.js.org/)", "UI development workshop"));
    }
    if config.husky {
        rows.push(("Git hooks", "[Husky](https://typicode.github.io/husky/)", "Lint staged files on commit"));
    }
    rows
}

fn script_rows(pm: PackageManager, config: &ProjectConfig) -> Vec<(String, &'static str)> {
    let mut rows = vec![
        (pm.run_script("dev"), "Start the development server"),
        (pm.run_script("build"), "Build for production"),
        (pm.run_script("start"), "Serve the production build"),
        (pm.run_script("lint"), "Run ESLint"),
    ];
    let dlx = pm.dlx_command().to_string();
    match config.orm {
        Orm::Prisma => {
            rows.push((format!("{dlx} prisma studio"), "Browse the database"));
            rows.push((format!("{dlx} prisma db push"), "Sync the schema to the database"));
        }
        Orm::Drizzle => {
            rows.push((pm.run_script("db:push"), "Sync the schema to the database"));
            rows.push((pm.run_script("db:studio"), "Browse the database"));
        }
        Orm::None => {}
    }
    if config.orval {
        rows.push((pm.run_script("api:generate"), "Regenerate the API client"));
    }
    if config.vitest {
        rows.push((pm.run_script("test"), "Run unit tests"));
    }
    if config.playwright {
        rows.push((pm.run_script("test:e2e"), "Run end-to-end tests"));
    }
    if config.storybook {
        rows.push((pm.run_script("storybook"), "Start Storybook"));
    }
    rows
}

fn readme(name: &str, pm: PackageManager, config: &ProjectConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {name}\n");
    out.push_str("Bootstrapped with `nxtgen`.\n\n## Tech stack\n\n");
    out.push_str("| Category | Technology | Description |\n| :--- | :--- | :--- |\n");
    for (category, tech, description) in stack_rows(config) {
        let _ = writeln!(out, "| **{category}** | {tech} | {description} |");
    }

    out.push_str("\n## Getting started\n\n```bash\n");
    let _ = writeln!(out, "{pm} install");
    if config.orm != Orm::None || config.auth.is_some() {
        out.push_str("cp .env.example .env\n");
    }
    let _ = writeln!(out, "{}\n```\n", pm.run_script("dev"));
    out.push_str("Open [http://localhost:3000](http://localhost:3000) in your browser.\n");

    out.push_str("\n## Scripts\n\n| Command | Description |\n| :--- | :--- |\n");
    for (command, description) in script_rows(pm, config) {
        let _ = writeln!(out, "| `{command}` | {description} |");
    }

    match config.auth {
        AuthProvider::NextAuth => out.push_str(
            "\n## Authentication\n\nAuth.js is configured in `src/auth.ts`. Generate `AUTH_SECRET` with `npx auth secret`.\n",
        ),
        AuthProvider::Clerk => out.push_str(
            "\n## Authentication\n\nSet `NEXT_PUBLIC_CLERK_PUBLISHABLE_KEY` and `CLERK_SECRET_KEY` from the Clerk dashboard.\n",
        ),
        AuthProvider::None => {}
    }

    if config.docker {
        let _ = write!(
            out,
            "\n## Docker\n\n```bash\ndocker build -t {name} .\ndocker run -p 3000:3000 {name}\n```\n"
        );
    }

    if let Some(spdx) = config.license.spdx() {
        let _ = write!(out, "\n## License\n\n{spdx}. See [LICENSE](./LICENSE).\n");
    }
    out
}

// ── LICENSE ──────────────────────────────────────────────────────────────────

fn license_text(license: License, year: i32, holder: &str) -> String {
    match license {
        License::Mit => format!(
            r#"MIT License

Copyright (c) {year} {holder}

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
"#
        ),
        License::Apache => format!(
            r#"Copyright {year} {holder}

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
"#
        ),
        License::None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::test_support::*;

    #[test]
    fn readme_reflects_selection_and_package_manager() {
        let config = ProjectConfig {
            orm: Orm::Drizzle,
            vitest: true,
            docker: true,
            ..ProjectConfig::default()
        };
        let out = readme("shop", PackageManager::Pnpm, &config);
        assert!(out.starts_with("# shop\n"));
        assert!(out.contains("[Drizzle](https://orm.drizzle.team/)"));
        assert!(out.contains("| `pnpm db:push` |"));
        assert!(out.contains("| `pnpm test` | Run unit tests |"));
        assert!(out.contains("cp .env.example .env"));
        assert!(out.contains("docker build -t shop ."));
        assert!(!out.contains("## License"));
    }

    #[test]
    fn license_uses_holder_and_year() {
        let config = ProjectConfig {
            license: License::Mit,
            ..ProjectConfig::default()
        };
        let fs = generated();
        apply(&Docs, &config, &fs).unwrap();

        let year = chrono::Local::now().year();
        let text = read(&fs, "LICENSE");
        assert!(text.starts_with("MIT License"));
        assert!(text.contains(&format!("Copyright (c) {year} Ada Lovelace")));
        assert!(read(&fs, "README.md").contains("MIT. See [LICENSE]"));
    }

    #[test]
    fn apache_notice() {
        let text = license_text(License::Apache, 2030, "demo");
        assert!(text.starts_with("Copyright 2030 demo"));
        assert!(text.contains("LICENSE-2.0"));
    }

    #[test]
    fn storybook_is_a_post_install_step() {
        let config = ProjectConfig {
            storybook: true,
            ..ProjectConfig::default()
        };
        let plan = register(&Docs, &config);
        assert_eq!(
            plan.post_install()[0].command(PackageManager::Pnpm).to_string(),
            "pnpm dlx storybook@latest init --yes"
        );
        assert!(register(&Docs, &ProjectConfig::default()).post_install().is_empty());
    }
}
