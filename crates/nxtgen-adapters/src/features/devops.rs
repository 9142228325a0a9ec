//! Container image, CI workflow and environment template.

use nxtgen_core::{
    application::{Feature, FeatureContext},
    domain::{AuthProvider, Orm, PackageManager, ProjectConfig},
    error::NxtgenResult,
};

pub struct DevOps;

impl Feature for DevOps {
    fn name(&self) -> &'static str {
        "devops"
    }

    fn description(&self) -> &'static str {
        "Adding deployment and CI files"
    }

    fn is_enabled(&self, config: &ProjectConfig) -> bool {
        config.docker || config.ci || needs_env_example(config)
    }

    fn apply(&self, ctx: &mut FeatureContext<'_>) -> NxtgenResult<()> {
        let config = ctx.config();
        if config.docker {
            ctx.write("Dockerfile", DOCKERFILE)?;
            ctx.write(".dockerignore", DOCKERIGNORE)?;
        }
        if config.ci {
            let workflow = ci_workflow(ctx.package_manager(), config.vitest);
            ctx.write(".github/workflows/ci.yml", &workflow)?;
        }
        if needs_env_example(config) {
            ctx.write(".env.example", &env_example(config))?;
        }
        Ok(())
    }
}

fn needs_env_example(config: &ProjectConfig) -> bool {
    config.orm != Orm::None || config.auth.is_some()
}

fn env_example(config: &ProjectConfig) -> String {
    let mut env = String::from("# Environment variables\n");
    match config.orm {
        Orm::Prisma => env.push_str("\n# Prisma\nDATABASE_URL=\"file:./dev.db\"\n"),
        Orm::Drizzle => env.push_str("\n# Drizzle (libSQL)\nDATABASE_URL=\"file:local.db\"\n"),
        Orm::None => {}
    }
    match config.auth {
        AuthProvider::NextAuth => env.push_str(
            "\n# Auth.js, generate with `npx auth secret`\nAUTH_SECRET=\"\"\n",
        ),
        AuthProvider::Clerk => env.push_str(
            "\n# Clerk, from the dashboard's API keys page\nNEXT_PUBLIC_CLERK_PUBLISHABLE_KEY=\"\"\nCLERK_SECRET_KEY=\"\"\n",
        ),
        AuthProvider::None => {}
    }
    env
}

fn ci_workflow(pm: PackageManager, unit_tests: bool) -> String {
    let (setup, install) = match pm {
        PackageManager::Npm => ("", "npm ci"),
        PackageManager::Pnpm => (
            "      - uses: pnpm/action-setup@v4\n",
            "pnpm install --frozen-lockfile",
        ),
        PackageManager::Yarn => ("", "yarn install --frozen-lockfile"),
        PackageManager::Bun => (
            "      - uses: oven-sh/setup-bun@v2\n",
            "bun install --frozen-lockfile",
        ),
    };
    let test = if unit_tests {
        format!("      - run: {}\n", pm.run_script("test"))
    } else {
        String::new()
    };
    format!(
        r#"name: CI

on:
  push:
    branches: ["main"]
  pull_request:
    branches: ["main"]

jobs:
  build:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
{setup}      - uses: actions/setup-node@v4
        with:
          node-version: "20"
      - run: {install}
      - run: {lint}
{test}      - run: {build}
"#,
        lint = pm.run_script("lint"),
        build = pm.run_script("build"),
    )
}

const DOCKERFILE: &str = r#"FROM node:20-alpine AS base

FROM base AS deps
RUN apk add --no-cache libc6-compat
WORKDIR /app
COPY package.json yarn.lock* package-lock.json* pnpm-lock.yaml* bun.lock* ./
RUN \
  if [ -f yarn.lock ]; then yarn --frozen-lockfile; \
  elif [ -f package-lock.json ]; then npm ci; \
  elif [ -f pnpm-lock.yaml ]; then corepack enable pnpm && pnpm i --frozen-lockfile; \
  elif [ -f bun.lock ]; then npm i -g bun && bun install --frozen-lockfile; \
  else echo "Lockfile not found." && exit 1; \
  fi

FROM base AS builder
WORKDIR /app
COPY --from=deps /app/node_modules ./node_modules
COPY . .
ENV NEXT_TELEMETRY_DISABLED=1
RUN npm run build

FROM base AS runner
WORKDIR /app
ENV NODE_ENV=production
ENV NEXT_TELEMETRY_DISABLED=1
RUN addgroup --system --gid 1001 nodejs && adduser --system --uid 1001 nextjs
COPY --from=builder /app/public ./public
COPY --from=builder /app/package.json ./package.json
COPY --from=builder /app/node_modules ./node_modules
COPY --from=builder --chown=nextjs:nodejs /app/.next ./.next
USER nextjs
EXPOSE 3000
ENV PORT=3000
CMD ["npm", "run", "start"]
"#;

const DOCKERIGNORE: &str = "Dockerfile\n.dockerignore\nnode_modules\nnpm-debug.log\nREADME.md\n.next\n.git\n.env*\n";
